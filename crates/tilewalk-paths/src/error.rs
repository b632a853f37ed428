//! Why a walk request failed.

use thiserror::Error;

/// Failure of [`Pathfinder::walk_to`](crate::Pathfinder::walk_to).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkError {
    #[error("no actor to walk")]
    ActorUnavailable,

    #[error("actor is paralyzed")]
    Paralyzed,

    #[error("no path to the destination")]
    NoPath,

    #[error("node budget of {budget} exhausted before reaching the destination")]
    NodeBudgetExhausted { budget: usize },

    #[error("walk cancelled during search")]
    Cancelled,
}

impl WalkError {
    /// The actor could not act, so no search was attempted.
    pub fn is_precondition(self) -> bool {
        matches!(self, WalkError::ActorUnavailable | WalkError::Paralyzed)
    }
}
