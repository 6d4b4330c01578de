use enumset::EnumSet;

use crate::engine::domains::DomainEvent;
use crate::engine::propagation::Complexity;
use crate::engine::propagation::ConstraintId;
use crate::engine::propagation::Network;
use crate::engine::trail::Cells;
use crate::engine::trail::VariableId;

/// The read-only view of the engine an [`Agenda`](super::Agenda) consults when scheduling.
#[derive(Clone, Copy, Debug)]
pub struct AgendaContext<'a> {
    network: &'a Network,
    cells: &'a Cells,
    date: u64,
}

impl<'a> AgendaContext<'a> {
    pub(crate) fn new(network: &'a Network, cells: &'a Cells, date: u64) -> Self {
        AgendaContext {
            network,
            cells,
            date,
        }
    }

    /// The logical date of the trail.
    pub fn date(&self) -> u64 {
        self.date
    }

    pub fn is_entailed(&self, constraint: ConstraintId) -> bool {
        self.network.is_entailed(constraint, self.cells)
    }

    pub fn is_idempotent(&self, constraint: ConstraintId) -> bool {
        self.network.is_idempotent(constraint)
    }

    pub fn complexity(&self, constraint: ConstraintId) -> Complexity {
        self.network.complexity(constraint)
    }

    pub fn constrains(&self, constraint: ConstraintId, variable: VariableId) -> bool {
        self.network.constrains(constraint, variable)
    }

    /// The constraints watching any of `events` on `variable`.
    pub fn dependents(
        &self,
        variable: VariableId,
        events: EnumSet<DomainEvent>,
    ) -> impl Iterator<Item = ConstraintId> + 'a {
        self.network.watch_list().dependents(variable, events)
    }
}
