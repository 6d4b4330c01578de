use super::Complexity;
use super::Constraint;
use super::ConstraintId;
use super::WatchList;
use crate::containers::KeyedVec;
use crate::engine::trail::Cells;
use crate::engine::trail::TrailedInteger;
use crate::engine::trail::VariableId;

/// The loaded constraints of an engine together with their entailment flags and the watch list
/// which maps variable events to dependent constraints.
#[derive(Default)]
pub struct Network {
    pub(crate) constraints: KeyedVec<ConstraintId, Box<dyn Constraint>>,
    pub(crate) entailment: KeyedVec<ConstraintId, TrailedInteger>,
    pub(crate) watch_list: WatchList,
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.constraints.iter().map(|c| c.name()).collect();
        f.debug_struct("Network")
            .field("constraints", &names)
            .field("entailment", &self.entailment)
            .field("watch_list", &self.watch_list)
            .finish()
    }
}

impl Network {
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraint_ids(&self) -> impl Iterator<Item = ConstraintId> {
        self.constraints.keys()
    }

    pub fn constraint(&self, constraint: ConstraintId) -> &dyn Constraint {
        self.constraints[constraint].as_ref()
    }

    pub fn complexity(&self, constraint: ConstraintId) -> Complexity {
        self.constraints[constraint].complexity()
    }

    pub fn is_idempotent(&self, constraint: ConstraintId) -> bool {
        self.constraints[constraint].is_idempotent()
    }

    pub fn constrains(&self, constraint: ConstraintId, variable: VariableId) -> bool {
        self.constraints[constraint].constrains(variable)
    }

    pub fn is_entailed(&self, constraint: ConstraintId, cells: &Cells) -> bool {
        cells.read(self.entailment[constraint]) != 0
    }

    pub fn watch_list(&self) -> &WatchList {
        &self.watch_list
    }
}
