use super::Cells;
use super::StorableValue;
use super::TrailedCell;
use super::TrailedInteger;
use super::VariableId;
use crate::containers::HashMap;
use crate::engine::domains::Domain;

/// One level of the [`ChoicePointStack`](super::ChoicePointStack).
///
/// It holds the value every cell had before it was first written at this level, and the decision
/// variables of the level (the variables on which a branching choice was made, usually one).
#[derive(Clone, Debug, Default)]
pub struct Checkpoint {
    pub(super) domains: HashMap<VariableId, Domain>,
    pub(super) integers: HashMap<TrailedInteger, i64>,
    decisions: Vec<VariableId>,
}

impl Checkpoint {
    /// Whether nothing was recorded at this level.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.integers.is_empty() && self.decisions.is_empty()
    }

    pub fn num_snapshots(&self) -> usize {
        self.domains.len() + self.integers.len()
    }

    pub fn snapshot<Cell: TrailedCell>(&self, cell: Cell) -> Option<&Cell::Value> {
        Cell::snapshots(self).get(&cell)
    }

    pub fn decisions(&self) -> &[VariableId] {
        &self.decisions
    }

    /// Store `value` as the snapshot of `cell` unless one is present already. Returns whether the
    /// snapshot was stored.
    pub(super) fn memorise<Cell: TrailedCell>(&mut self, cell: Cell, value: &Cell::Value) -> bool {
        let snapshots = Cell::snapshots_mut(self);
        if snapshots.contains_key(&cell) {
            return false;
        }

        let _ = snapshots.insert(cell, value.snapshot());
        true
    }

    pub(super) fn record_decision(&mut self, variable: VariableId) {
        if !self.decisions.contains(&variable) {
            self.decisions.push(variable);
        }
    }

    /// Write every snapshot back into `cells` and hand the decision variables to
    /// `on_decision_undone`. Afterwards the checkpoint is empty but keeps its allocations.
    pub(super) fn restore(
        &mut self,
        cells: &mut Cells,
        mut on_decision_undone: impl FnMut(&Cells, VariableId),
    ) {
        for (variable, domain) in self.domains.drain() {
            *variable.value_mut(cells) = domain;
        }
        for (integer, value) in self.integers.drain() {
            *integer.value_mut(cells) = value;
        }
        for variable in self.decisions.drain(..) {
            on_decision_undone(cells, variable);
        }
    }

    /// Move the contents of this checkpoint into the older checkpoint `target`. Snapshots of cells
    /// which `target` recorded already are dropped, as those of `target` are older.
    pub(super) fn merge_into(&mut self, target: &mut Checkpoint) {
        for (variable, domain) in self.domains.drain() {
            let _ = target.domains.entry(variable).or_insert(domain);
        }
        for (integer, value) in self.integers.drain() {
            let _ = target.integers.entry(integer).or_insert(value);
        }
        for variable in self.decisions.drain(..) {
            target.record_decision(variable);
        }
    }
}
