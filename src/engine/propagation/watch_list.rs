use enumset::EnumSet;

use super::ConstraintId;
use crate::containers::KeyedVec;
use crate::engine::domains::DomainEvent;
use crate::engine::trail::VariableId;

/// Keeps track of which constraints have to be rescheduled when an event happens on a variable.
#[derive(Clone, Debug, Default)]
pub struct WatchList {
    watchers: KeyedVec<VariableId, Vec<Watcher>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Watcher {
    constraint: ConstraintId,
    events: EnumSet<DomainEvent>,
}

impl WatchList {
    /// Let `constraint` watch `events` on `variable`. Registering the same pair twice adds the
    /// events to the existing registration.
    pub(crate) fn watch(
        &mut self,
        variable: VariableId,
        constraint: ConstraintId,
        events: EnumSet<DomainEvent>,
    ) {
        self.watchers.accomodate(variable, vec![]);
        let watchers = &mut self.watchers[variable];

        match watchers
            .iter_mut()
            .find(|watcher| watcher.constraint == constraint)
        {
            Some(watcher) => watcher.events |= events,
            None => watchers.push(Watcher { constraint, events }),
        }
    }

    /// The constraints which watch at least one of `events` on `variable`.
    pub fn dependents(
        &self,
        variable: VariableId,
        events: EnumSet<DomainEvent>,
    ) -> impl Iterator<Item = ConstraintId> + '_ {
        self.watchers
            .get(variable)
            .into_iter()
            .flatten()
            .filter(move |watcher| !watcher.events.is_disjoint(events))
            .map(|watcher| watcher.constraint)
    }

    /// The events `constraint` watches on `variable`.
    pub fn watched_events(
        &self,
        variable: VariableId,
        constraint: ConstraintId,
    ) -> EnumSet<DomainEvent> {
        self.watchers
            .get(variable)
            .into_iter()
            .flatten()
            .filter(|watcher| watcher.constraint == constraint)
            .map(|watcher| watcher.events)
            .fold(EnumSet::empty(), |acc, events| acc | events)
    }

    pub fn is_watching_anything(&self) -> bool {
        self.watchers.iter().any(|watchers| !watchers.is_empty())
    }
}
