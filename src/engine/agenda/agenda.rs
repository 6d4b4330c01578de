use std::fmt::Debug;

use enumset::EnumSet;

use super::AgendaContext;
use crate::engine::domains::DomainEvent;
use crate::engine::propagation::ConstraintId;
use crate::engine::trail::VariableId;

/// The worklist of constraints which are pending to be filtered.
///
/// The agenda remembers which constraint it handed out last with [`Agenda::pop`]; that constraint
/// is "currently filtering" until the next call to [`Agenda::pop`] or [`Agenda::clear`].
pub trait Agenda: Debug {
    /// Schedule `constraint`. Adding a constraint which is already pending does nothing.
    fn add(&mut self, context: &AgendaContext, constraint: ConstraintId);

    /// Schedule every constraint of `constraints`, skipping entailed constraints and, if it is
    /// idempotent, the constraint which is currently filtering.
    fn add_all(
        &mut self,
        context: &AgendaContext,
        constraints: &mut dyn Iterator<Item = ConstraintId>,
    ) {
        for constraint in constraints {
            if context.is_entailed(constraint) {
                continue;
            }
            if self.currently_filtering() == Some(constraint) && context.is_idempotent(constraint)
            {
                continue;
            }
            self.add(context, constraint);
        }
    }

    /// Remove and return the next constraint to filter, or `None` if nothing is pending.
    fn pop(&mut self, context: &AgendaContext) -> Option<ConstraintId>;

    /// Drop every pending constraint and forget which constraint is filtering.
    fn clear(&mut self);

    /// Called whenever the domain of `variable` changed with `events`; schedules every constraint
    /// watching one of these events.
    fn update(&mut self, context: &AgendaContext, variable: VariableId, events: EnumSet<DomainEvent>) {
        let mut dependents = context.dependents(variable, events);
        self.add_all(context, &mut dependents);
    }

    /// Called by the engine when the constraint which is currently filtering returned without an
    /// inconsistency.
    fn filtering_finished(&mut self, _context: &AgendaContext) {}

    fn currently_filtering(&self) -> Option<ConstraintId>;

    fn is_pending(&self, constraint: ConstraintId) -> bool;

    fn num_pending(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.num_pending() == 0
    }

    /// The date at which a pending constraint was scheduled.
    fn scheduled_at(&self, constraint: ConstraintId) -> Option<u64>;
}
