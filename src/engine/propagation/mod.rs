//! The contract between the engine and the constraints it propagates.
//!
//! A [`Constraint`] only talks to the engine through a [`DependencyContext`] (once, after
//! loading) and a [`PropagationContextMut`] (whenever it is initialised or filtered).
mod complexity;
mod constraint;
mod constraint_id;
mod dependency_context;
mod network;
mod propagation_context;
mod watch_list;

pub use complexity::*;
pub use constraint::*;
pub use constraint_id::*;
pub use dependency_context::*;
pub use network::*;
pub(crate) use propagation_context::narrow;
pub use propagation_context::PropagationContextMut;
pub use watch_list::*;
