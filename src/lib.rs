//! Quince: an incremental constraint propagation engine.
//!
//! Variables have a [`Domain`] which [`Constraint`]s narrow monotonically. Every narrowing is
//! recorded on a trail of checkpoints so that a search can undo its decisions, and schedules the
//! constraints depending on the narrowed variable on an agenda. The [`PropagationEngine`] filters
//! scheduled constraints until nothing is pending (a fixpoint) or an [`Inconsistency`] is found.
//!
//! ```
//! use quince::basic_types::PropagationStatusCP;
//! use quince::engine::propagation::binary;
//! use quince::engine::propagation::PropagationContextMut;
//! use quince::Constraint;
//! use quince::Problem;
//! use quince::PropagationEngine;
//! use quince::VariableId;
//!
//! /// `x < y`
//! struct LessThan([VariableId; 2]);
//!
//! impl Constraint for LessThan {
//!     fn name(&self) -> &str {
//!         "less_than"
//!     }
//!
//!     fn variables(&self) -> &[VariableId] {
//!         &self.0
//!     }
//!
//!     fn filter(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
//!         let [x, y] = self.0;
//!         if let Some(min) = context.min(x) {
//!             let _ = context.set_min(y, min + 1)?;
//!         }
//!         if let Some(max) = context.max(y) {
//!             let _ = context.set_max(x, max - 1)?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut engine = PropagationEngine::default();
//! let x = engine.new_interval_variable(0, 5);
//! let y = engine.new_interval_variable(0, 5);
//!
//! let mut problem = Problem::new("example");
//! let _ = problem.post(LessThan(binary(x, y)));
//! engine.load(problem).expect("the problem is consistent");
//!
//! assert_eq!(Some(1), engine.domain(y).min());
//!
//! let _ = engine.decide(x, 3).expect("3 is in the domain of x");
//! assert!(engine.propagate().is_ok());
//! assert_eq!(Some(4), engine.domain(y).min());
//!
//! engine.rewind();
//! assert_eq!(Some(0), engine.domain(x).min());
//! ```
pub mod asserts;
pub mod basic_types;
pub mod containers;
pub mod engine;
pub mod options;
pub mod statistics;
#[cfg(test)]
mod tests;

pub use basic_types::DomainComparisonError;
pub use basic_types::EngineError;
pub use basic_types::Inconsistency;
pub use engine::domains::Domain;
pub use engine::domains::DomainEvent;
pub use engine::domains::DomainEvents;
pub use engine::problem::Problem;
pub use engine::problem::Relation;
pub use engine::propagation::Complexity;
pub use engine::propagation::Constraint;
pub use engine::propagation::ConstraintId;
pub use engine::trail::VariableId;
pub use engine::PropagationEngine;
pub use options::AgendaPolicy;
pub use options::EngineOptions;
