use super::DependencyContext;
use super::PropagationContextMut;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::basic_types::Inconsistency;
use crate::engine::domains::DomainEvents;
use crate::engine::propagation::Complexity;
use crate::engine::trail::VariableId;
#[cfg(doc)]
use crate::engine::PropagationEngine;

/// All constraints implement the [`Constraint`] trait. It is the only extension point for new
/// kinds of constraints; a constraint only interacts with the engine through the contexts it is
/// handed.
///
/// The only required functions are [`Constraint::name`], [`Constraint::variables`] and
/// [`Constraint::filter`], all other functions have default implementations.
pub trait Constraint {
    /// Return the name of the constraint, this is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// The variables this constraint is posted on, in a fixed order.
    fn variables(&self) -> &[VariableId];

    /// The worst-case cost of a call to [`Constraint::filter`].
    fn complexity(&self) -> Complexity {
        Complexity::default()
    }

    /// Whether a call to [`Constraint::filter`] directly after a successful call, without any
    /// other domain change in between, can never narrow a domain.
    ///
    /// The agenda does not reschedule an idempotent constraint because of its own narrowings.
    fn is_idempotent(&self) -> bool {
        false
    }

    /// Narrow the domains of [`Constraint::variables`] to values consistent with the relation.
    ///
    /// All narrowing goes through the `context`, which trails the old domain and notifies the
    /// agenda. If a narrowing empties a domain, or the constraint detects that the current domains
    /// cannot be satisfied, an [`Inconsistency`] is returned; this should be propagated as is
    /// with `?`, it is handled by the caller of [`PropagationEngine::propagate`].
    ///
    /// Constraints are not required to reach a fixed point, they are filtered again when any of
    /// their variables changes (see [`Constraint::update_dependencies`]).
    fn filter(&self, context: PropagationContextMut) -> PropagationStatusCP;

    /// A narrowing which is applied once when the constraint enters the engine, before any
    /// propagation, regardless of the events on its variables.
    fn init(&self, _context: PropagationContextMut) -> PropagationStatusCP {
        Ok(())
    }

    /// Register the events on its variables after which this constraint has to be filtered again.
    ///
    /// By default the constraint reacts to any narrowing of any of its variables.
    fn update_dependencies(&self, context: &mut DependencyContext) {
        for &variable in self.variables() {
            context.register(variable, DomainEvents::ANY);
        }
    }

    /// Whether `variable` is one of the variables of this constraint.
    fn constrains(&self, variable: VariableId) -> bool {
        self.variables().contains(&variable)
    }
}

/// The variable tuple of a unary constraint.
pub fn unary(x: VariableId) -> [VariableId; 1] {
    [x]
}

/// The variable tuple of a binary constraint.
pub fn binary(x: VariableId, y: VariableId) -> [VariableId; 2] {
    [x, y]
}

/// The variable tuple of a ternary constraint.
pub fn ternary(x: VariableId, y: VariableId, z: VariableId) -> [VariableId; 3] {
    [x, y, z]
}
