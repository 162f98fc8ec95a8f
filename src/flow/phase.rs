//! Lifecycle of the question currently being played.
//!
//! ```text
//! Idle --reveal--> Revealed --show_answer--> AnswerShown --decide--> Idle
//!   \                 ^
//!    \--reveal (Daily Double)--> AwaitingTeam --select team--+
//!                                     |   (score < minimum wager)
//!                                     +--select team--> Wagering --confirm_wager--> AnswerShown
//! ```
//!
//! Any non-idle phase may be cancelled back to `Idle`.

use serde::{Deserialize, Serialize};

use crate::board::Question;
use crate::core::QuestionKey;
use crate::teams::TeamId;

/// The question being played, from reveal until a decision or cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveQuestion {
    pub key: QuestionKey,

    /// Value used for scoring. Replaced by the wager once one is confirmed.
    pub point_value: i64,

    /// Face value printed on the tile.
    pub original_point_value: i64,

    /// Whether the tile is a Daily Double.
    pub is_daily: bool,
}

impl ActiveQuestion {
    /// Start playing `question` at `key`.
    #[must_use]
    pub fn from_cell(key: QuestionKey, question: &Question) -> Self {
        Self {
            key,
            point_value: question.points,
            original_point_value: question.points,
            is_daily: question.is_daily,
        }
    }
}

/// How the active question will be scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Play {
    /// Face value; any team may answer and steals are allowed.
    Standard,

    /// Daily Double whose chooser could not cover the minimum wager.
    /// Scored exactly like `Standard`.
    Unwagered { chooser: TeamId },

    /// Daily Double with a confirmed wager held by `team`.
    Wagered { team: TeamId },
}

/// Current lifecycle state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowPhase {
    /// No question open.
    #[default]
    Idle,

    /// Daily Double opened, waiting for the team that will wager.
    AwaitingTeam { active: ActiveQuestion },

    /// Wagering team chosen, waiting for the amount.
    Wagering { active: ActiveQuestion, team: TeamId },

    /// Question visible, answer hidden.
    Revealed { active: ActiveQuestion, play: Play },

    /// Answer visible, waiting for a scoring decision.
    AnswerShown { active: ActiveQuestion, play: Play },
}

impl FlowPhase {
    /// Short name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FlowPhase::Idle => "idle",
            FlowPhase::AwaitingTeam { .. } => "awaiting a wagering team",
            FlowPhase::Wagering { .. } => "wagering",
            FlowPhase::Revealed { .. } => "showing the question",
            FlowPhase::AnswerShown { .. } => "showing the answer",
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, FlowPhase::Idle)
    }

    /// The question being played, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveQuestion> {
        match self {
            FlowPhase::Idle => None,
            FlowPhase::AwaitingTeam { active }
            | FlowPhase::Wagering { active, .. }
            | FlowPhase::Revealed { active, .. }
            | FlowPhase::AnswerShown { active, .. } => Some(active),
        }
    }

    /// Scoring mode, once it is settled.
    #[must_use]
    pub fn play(&self) -> Option<Play> {
        match self {
            FlowPhase::Revealed { play, .. } | FlowPhase::AnswerShown { play, .. } => Some(*play),
            _ => None,
        }
    }

    /// Whether the active question carries a confirmed wager.
    #[must_use]
    pub fn is_wagered(&self) -> bool {
        matches!(self.play(), Some(Play::Wagered { .. }))
    }

    /// The team that chose the active Daily Double, wagered or not.
    #[must_use]
    pub fn wagering_team(&self) -> Option<TeamId> {
        match self {
            FlowPhase::Wagering { team, .. } => Some(*team),
            _ => match self.play() {
                Some(Play::Wagered { team }) | Some(Play::Unwagered { chooser: team }) => Some(team),
                _ => None,
            },
        }
    }

    /// Whether the answer is currently shown.
    #[must_use]
    pub fn answer_visible(&self) -> bool {
        matches!(self, FlowPhase::AnswerShown { .. })
    }
}
