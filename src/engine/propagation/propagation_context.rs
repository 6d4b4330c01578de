use std::collections::BTreeSet;

use enumset::EnumSet;

use super::ConstraintId;
use super::Network;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Inconsistency;
use crate::basic_types::NarrowingResult;
use crate::engine::agenda::Agenda;
use crate::engine::agenda::AgendaContext;
use crate::engine::domains::Domain;
use crate::engine::domains::DomainEvent;
use crate::engine::trail::Cells;
use crate::engine::trail::ChoicePointStack;
use crate::engine::trail::VariableId;

/// [`PropagationContextMut`] is passed to a constraint when it is filtered or initialised. It is
/// the only way for a constraint to read and narrow domains.
///
/// Every narrowing first stores the domain in the current checkpoint (if it is the first write at
/// this level), then changes it, and finally notifies the agenda of the events that happened.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    cells: &'a mut Cells,
    trail: &'a mut ChoicePointStack,
    agenda: &'a mut dyn Agenda,
    network: &'a Network,
    constraint: ConstraintId,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(
        cells: &'a mut Cells,
        trail: &'a mut ChoicePointStack,
        agenda: &'a mut dyn Agenda,
        network: &'a Network,
        constraint: ConstraintId,
    ) -> Self {
        PropagationContextMut {
            cells,
            trail,
            agenda,
            network,
            constraint,
        }
    }

    /// The constraint which is being filtered.
    pub fn constraint(&self) -> ConstraintId {
        self.constraint
    }

    /// The logical date of the trail, see [`ChoicePointStack::current_date`].
    pub fn current_date(&self) -> u64 {
        self.trail.current_date()
    }

    pub fn domain(&self, variable: VariableId) -> &Domain {
        self.cells.domain(variable)
    }

    pub fn min(&self, variable: VariableId) -> Option<i32> {
        self.domain(variable).min()
    }

    pub fn max(&self, variable: VariableId) -> Option<i32> {
        self.domain(variable).max()
    }

    pub fn contains(&self, variable: VariableId, value: i32) -> bool {
        self.domain(variable).contains(value)
    }

    pub fn is_fixed(&self, variable: VariableId) -> bool {
        self.domain(variable).is_singleton()
    }

    pub fn assigned_value(&self, variable: VariableId) -> Option<i32> {
        self.domain(variable).assigned_value()
    }

    /// Narrowings panic when applied to the wrong kind of variable, see
    /// [`Domain::set_min`](crate::Domain::set_min).
    pub fn set_min(&mut self, variable: VariableId, value: i32) -> NarrowingResult {
        if self.min(variable).is_some_and(|min| value <= min) {
            return Ok(false);
        }
        self.narrow(variable, |domain| domain.set_min(value))
    }

    pub fn set_max(&mut self, variable: VariableId, value: i32) -> NarrowingResult {
        if self.max(variable).is_some_and(|max| value >= max) {
            return Ok(false);
        }
        self.narrow(variable, |domain| domain.set_max(value))
    }

    pub fn set_value(&mut self, variable: VariableId, value: i32) -> NarrowingResult {
        if self.assigned_value(variable) == Some(value) {
            return Ok(false);
        }
        self.narrow(variable, |domain| domain.set_value(value))
    }

    pub fn remove_value(&mut self, variable: VariableId, value: i32) -> NarrowingResult {
        if !self.contains(variable, value) {
            return Ok(false);
        }
        self.narrow(variable, |domain| domain.remove_value(value))
    }

    /// Require `element` to be part of the set variable.
    pub fn include(&mut self, variable: VariableId, element: i32) -> NarrowingResult {
        self.narrow(variable, |domain| domain.include(element))
    }

    /// Forbid `element` from being part of the set variable.
    pub fn exclude(&mut self, variable: VariableId, element: i32) -> NarrowingResult {
        self.narrow(variable, |domain| domain.exclude(element))
    }

    /// Fix the set variable to exactly `set`.
    pub fn set_set_value(&mut self, variable: VariableId, set: &BTreeSet<i32>) -> NarrowingResult {
        self.narrow(variable, |domain| domain.set_set_value(set))
    }

    /// Mark the constraint as entailed: it is satisfied by every combination of values left in the
    /// domains of its variables, so it is not filtered again until the marker is rewound.
    pub fn set_entailed(&mut self) {
        let flag = self.network.entailment[self.constraint];
        if self.cells.read(flag) != 0 {
            return;
        }

        self.trail.memorise_if_first_write(flag, self.cells);
        self.cells.write_integer(flag, 1);
    }

    pub fn is_entailed(&self) -> bool {
        self.network.is_entailed(self.constraint, self.cells)
    }

    /// The inconsistency a constraint reports when it detects that its variables cannot be
    /// satisfied, without emptying a domain itself.
    pub fn conflict(&self) -> Inconsistency {
        Inconsistency::Conflict(self.constraint)
    }

    fn narrow(
        &mut self,
        variable: VariableId,
        narrowing: impl FnOnce(&mut Domain) -> EnumSet<DomainEvent>,
    ) -> NarrowingResult {
        narrow(
            self.cells,
            self.trail,
            self.agenda,
            self.network,
            variable,
            narrowing,
        )
    }
}

/// Apply `narrowing` to the domain of `variable`, trailing the old domain beforehand and
/// notifying `agenda` of the resulting events.
pub(crate) fn narrow(
    cells: &mut Cells,
    trail: &mut ChoicePointStack,
    agenda: &mut dyn Agenda,
    network: &Network,
    variable: VariableId,
    narrowing: impl FnOnce(&mut Domain) -> EnumSet<DomainEvent>,
) -> NarrowingResult {
    trail.memorise_if_first_write(variable, cells);

    let events = narrowing(cells.domain_mut(variable));
    if events.is_empty() {
        return Ok(false);
    }

    if cells.domain(variable).is_empty() {
        return Err(EmptyDomain.into());
    }

    let context = AgendaContext::new(network, cells, trail.current_date());
    agenda.update(&context, variable, events);

    Ok(true)
}
