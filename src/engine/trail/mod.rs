//! The undo mechanism of the engine.
//!
//! All state which has to be restored on backtracking lives in [`Cells`]. Before a cell is written
//! for the first time at a level of the [`ChoicePointStack`], a snapshot of its value is stored in
//! the [`Checkpoint`] of that level. Rewinding a level writes all of its snapshots back, so the
//! cost of a rewind is bounded by the number of distinct cells written at that level rather than by
//! the number of writes.
mod cells;
mod checkpoint;
mod choice_point_stack;

pub use cells::*;
pub use checkpoint::*;
pub use choice_point_stack::*;
