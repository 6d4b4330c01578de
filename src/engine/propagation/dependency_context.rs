use enumset::EnumSet;

use super::ConstraintId;
use super::WatchList;
#[cfg(doc)]
use crate::engine::propagation::Constraint;
use crate::engine::domains::DomainEvent;
use crate::engine::trail::VariableId;

/// Handed to [`Constraint::update_dependencies`] once the problem is flattened. Through it a
/// constraint subscribes to events on its variables.
#[derive(Debug)]
pub struct DependencyContext<'a> {
    watch_list: &'a mut WatchList,
    constraint: ConstraintId,
}

impl<'a> DependencyContext<'a> {
    pub(crate) fn new(watch_list: &'a mut WatchList, constraint: ConstraintId) -> Self {
        DependencyContext {
            watch_list,
            constraint,
        }
    }

    /// Reschedule the constraint whenever one of `events` happens on `variable`.
    pub fn register(&mut self, variable: VariableId, events: EnumSet<DomainEvent>) {
        self.watch_list.watch(variable, self.constraint, events);
    }

    pub fn constraint(&self) -> ConstraintId {
        self.constraint
    }
}
