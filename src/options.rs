//! Options which configure a [`PropagationEngine`](crate::PropagationEngine).
use std::fmt::Display;

use clap::ValueEnum;

/// Options for the [`PropagationEngine`](crate::PropagationEngine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// The order in which pending constraints are filtered.
    pub agenda: AgendaPolicy,
    /// The number of checkpoints which are allocated up front.
    pub checkpoint_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            agenda: AgendaPolicy::default(),
            checkpoint_capacity: 16,
        }
    }
}

/// The policy which decides which pending constraint is filtered next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum AgendaPolicy {
    /// The most recently scheduled constraint is filtered first.
    Stack,
    /// The constraint with the lowest complexity is filtered first, ties are broken by the order
    /// in which they were scheduled.
    #[default]
    Complexity,
    /// As [`AgendaPolicy::Complexity`], but the events a constraint causes on its own variables
    /// are coalesced until it finishes filtering.
    LazyComplexity,
}

impl Display for AgendaPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgendaPolicy::Stack => write!(f, "stack"),
            AgendaPolicy::Complexity => write!(f, "complexity"),
            AgendaPolicy::LazyComplexity => write!(f, "lazy-complexity"),
        }
    }
}
