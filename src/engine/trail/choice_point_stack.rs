use log::debug;
use log::trace;
use log::warn;

use super::Cells;
use super::Checkpoint;
use super::TrailedCell;
use super::VariableId;
use crate::quince_assert_extreme;
use crate::quince_assert_moderate;
use crate::quince_assert_simple;

/// The trail: an ordered stack of [`Checkpoint`]s.
///
/// Index 0 is a sentinel which is never rewound; the stack is empty when the sentinel is the top.
/// Checkpoint objects are kept after they are rewound and reused by later pushes, so the
/// allocated length ([`ChoicePointStack::capacity`]) may exceed the active depth.
///
/// The logical date increases by exactly one on every rewind and never on a push. Constraints and
/// the agenda use it to tell apart states which would otherwise look the same.
#[derive(Clone, Debug)]
pub struct ChoicePointStack {
    checkpoints: Vec<Checkpoint>,
    top: usize,
    date: u64,
    max_depth: usize,
}

impl Default for ChoicePointStack {
    fn default() -> Self {
        ChoicePointStack::with_capacity(0)
    }
}

impl ChoicePointStack {
    /// Create a stack with `capacity` checkpoints allocated up front.
    pub fn with_capacity(capacity: usize) -> Self {
        ChoicePointStack {
            checkpoints: vec![Checkpoint::default(); capacity + 1],
            top: 0,
            date: 0,
            max_depth: 0,
        }
    }

    /// Open a new checkpoint above the current top.
    pub fn push(&mut self) {
        self.top += 1;
        if self.top == self.checkpoints.len() {
            self.checkpoints.push(Checkpoint::default());
        }
        quince_assert_moderate!(
            self.checkpoints[self.top].is_empty(),
            "a reused checkpoint should have been cleared when it was rewound"
        );

        self.max_depth = self.max_depth.max(self.top);
        trace!("opened checkpoint {}", self.top);
    }

    /// Mark `variable` as a decision of the current checkpoint.
    pub fn record_decision(&mut self, variable: VariableId) {
        quince_assert_simple!(
            !self.is_empty(),
            "a decision can only be recorded after a checkpoint has been pushed"
        );
        self.checkpoints[self.top].record_decision(variable);
    }

    /// Store the current value of `cell` in the top checkpoint, unless it was stored there already.
    ///
    /// The first snapshot at a level is also stored in the enclosing checkpoint if that one has
    /// none for `cell`, in which case the value is still the one the enclosing level started with.
    /// Nothing is stored while no checkpoint is open, as the sentinel is never rewound.
    pub fn memorise_if_first_write<Cell: TrailedCell>(&mut self, cell: Cell, cells: &Cells) {
        if self.top == 0 {
            return;
        }

        let value = cell.value(cells);
        if !self.checkpoints[self.top].memorise(cell, value) {
            return;
        }

        if self.top > 1 {
            let _ = self.checkpoints[self.top - 1].memorise(cell, value);
        }
    }

    /// Restore every cell recorded in the top checkpoint and remove it.
    ///
    /// `on_decision_undone` is called for each decision variable of the checkpoint after all cells
    /// are restored, so that the constraints depending on it can be rescheduled.
    pub fn rewind(&mut self, cells: &mut Cells, on_decision_undone: impl FnMut(&Cells, VariableId)) {
        if self.is_empty() {
            warn!("attempted to rewind a trail without open checkpoints");
            return;
        }

        let previous_date = self.date;
        self.date += 1;

        self.checkpoints[self.top].restore(cells, on_decision_undone);
        trace!("rewound checkpoint {} at date {}", self.top, self.date);
        self.top -= 1;

        quince_assert_extreme!(self.date > previous_date);
    }

    /// Alias of [`ChoicePointStack::rewind`].
    pub fn pop(&mut self, cells: &mut Cells, on_decision_undone: impl FnMut(&Cells, VariableId)) {
        self.rewind(cells, on_decision_undone)
    }

    /// Rewind checkpoints until `depth` is the top.
    pub fn rewind_to(
        &mut self,
        depth: usize,
        cells: &mut Cells,
        mut on_decision_undone: impl FnMut(&Cells, VariableId),
    ) {
        quince_assert_simple!(depth <= self.top, "cannot rewind to a deeper level");
        while self.top > depth {
            self.rewind(cells, &mut on_decision_undone);
        }
    }

    /// Rewind every open checkpoint and open a fresh one, discarding the whole search state.
    pub fn reset(&mut self, cells: &mut Cells, on_decision_undone: impl FnMut(&Cells, VariableId)) {
        debug!("resetting trail at depth {}", self.top);
        self.rewind_to(0, cells, on_decision_undone);
        self.push();
    }

    /// Merge the top checkpoint into the one below it without restoring any value.
    ///
    /// Rewinding the merged checkpoint afterwards has the same effect as rewinding both levels one
    /// after the other. The date does not change.
    pub fn merge(&mut self) {
        quince_assert_simple!(
            self.top >= 2,
            "merging requires two open checkpoints, the sentinel cannot absorb a level"
        );

        let (older, younger) = self.checkpoints.split_at_mut(self.top);
        younger[0].merge_into(&mut older[self.top - 1]);

        debug!("merged checkpoint {} into {}", self.top, self.top - 1);
        self.top -= 1;
    }

    /// Whether no checkpoint is open.
    pub fn is_empty(&self) -> bool {
        self.top == 0
    }

    /// The number of open checkpoints.
    pub fn depth(&self) -> usize {
        self.top
    }

    /// The largest depth the stack ever reached.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn current_date(&self) -> u64 {
        self.date
    }

    /// The number of allocated checkpoints, excluding the sentinel.
    pub fn capacity(&self) -> usize {
        self.checkpoints.len() - 1
    }

    /// The checkpoint at the top of the stack.
    pub fn top_checkpoint(&self) -> &Checkpoint {
        &self.checkpoints[self.top]
    }
}
