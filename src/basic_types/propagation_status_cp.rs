use thiserror::Error;

use crate::engine::propagation::ConstraintId;

/// The result of invoking the filtering of a constraint. Filtering either succeeds or identifies an
/// inconsistency, in which case the current checkpoint has to be rewound.
pub type PropagationStatusCP = Result<(), Inconsistency>;

/// Returned by a narrowing operation; `Ok(true)` means the domain changed.
pub type NarrowingResult = Result<bool, Inconsistency>;

/// A propagation inconsistency. It is not handled by the engine itself; the caller of
/// [`PropagationEngine::propagate`](crate::PropagationEngine::propagate) decides whether to rewind
/// a level or to conclude that no solution exists.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Inconsistency {
    /// A narrowing left the domain of a variable without values.
    #[error("empty domain")]
    EmptyDomain,
    /// The constraint detected an impossible configuration directly.
    #[error("conflict detected by {0}")]
    Conflict(ConstraintId),
}

/// Marker for a narrowing which emptied a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}
