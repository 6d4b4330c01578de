use thiserror::Error;

use super::Inconsistency;
use crate::engine::domains::DomainKind;
use crate::engine::trail::VariableId;

/// Two domains of incompatible representations were compared or intersected.
///
/// This is a modelling error rather than a search outcome, so it is never turned into an
/// [`Inconsistency`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("comparison between a {left} domain and a {right} domain is not supported")]
pub struct DomainComparisonError {
    pub left: DomainKind,
    pub right: DomainKind,
}

/// Errors which are reported by the set-up surface of the [`PropagationEngine`](crate::PropagationEngine).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("a problem has already been loaded into this engine")]
    ProblemAlreadyLoaded,
    #[error("variable {0} does not exist in this engine")]
    UnknownVariable(VariableId),
    #[error("the problem is inconsistent at the root: {0}")]
    RootInconsistency(Inconsistency),
    #[error(transparent)]
    DomainComparison(#[from] DomainComparisonError),
}
