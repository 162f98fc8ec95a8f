//! Error types for the quiz engine.
//!
//! Every error is recoverable: a failed operation leaves the session exactly
//! as it was before the call.

use thiserror::Error;

use crate::teams::TeamId;

/// Errors raised by board, team, flow, and snapshot operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("cell ({category}, {row}) is outside the board")]
    CellOutOfRange { category: usize, row: usize },

    #[error("cell ({category}, {row}) has already been revealed")]
    CellAlreadyRevealed { category: usize, row: usize },

    #[error("team index {index} is out of range ({team_count} teams)")]
    TeamOutOfRange { index: usize, team_count: usize },

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("cannot {operation} while {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: &'static str,
    },

    #[error("a steal with more than two teams needs an explicit victim")]
    StealVictimRequired,

    #[error("{0} cannot be the victim of this steal")]
    InvalidStealVictim(TeamId),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("encoding failed: {0}")]
    Codec(String),
}

impl QuizError {
    /// Check if this error means an index did not address a playable cell or team.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            QuizError::CellOutOfRange { .. }
                | QuizError::CellAlreadyRevealed { .. }
                | QuizError::TeamOutOfRange { .. }
        )
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, QuizError>;
