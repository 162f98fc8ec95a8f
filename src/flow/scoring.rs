//! Score deltas for a decision on the active question.
//!
//! Pure functions: they compute what should change, the session applies it
//! through the ledger.

use serde::{Deserialize, Serialize};

use super::phase::{ActiveQuestion, Play};
use crate::error::{QuizError, Result};
use crate::ledger::EntryTag;
use crate::teams::TeamId;

/// Who, if anyone, loses points when a correct answer is a steal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steal {
    /// Not a steal.
    #[default]
    None,
    /// Steal from "the other team". Only resolvable with exactly two teams.
    Auto,
    /// Steal from an explicit team.
    From(TeamId),
}

/// A side charge recorded next to the primary decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub tag: EntryTag,
    pub team: TeamId,
    pub delta: i64,
}

/// Everything a decision changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoringPlan {
    /// Team credited (or debited) by the decision.
    pub team: TeamId,
    /// Primary delta for `team`.
    pub delta: i64,
    /// Wager-loss or steal penalty, if any.
    pub charge: Option<Charge>,
}

/// Work out the deltas for `team` answering `active`.
///
/// - Wager holder: `+2×wager` when correct, `-wager` otherwise.
/// - Any other team on a wagered tile: `±face value`, and on a correct
///   answer the wager holder is charged `-wager`.
/// - Unwagered tile: `±value`; a correct steal charges the victim `-value`.
///   Steals are ignored on wagered tiles and on incorrect answers.
///
/// `team` must already be validated against `team_count`.
pub fn plan(
    active: &ActiveQuestion,
    play: Play,
    team: TeamId,
    correct: bool,
    steal: Steal,
    team_count: usize,
) -> Result<ScoringPlan> {
    let signed = |value: i64| if correct { value } else { value.saturating_neg() };

    match play {
        Play::Wagered { team: holder } if holder == team => Ok(ScoringPlan {
            team,
            delta: if correct {
                active.point_value.saturating_mul(2)
            } else {
                active.point_value.saturating_neg()
            },
            charge: None,
        }),
        Play::Wagered { team: holder } => Ok(ScoringPlan {
            team,
            delta: signed(active.original_point_value),
            charge: correct.then_some(Charge {
                tag: EntryTag::Wager,
                team: holder,
                delta: active.point_value.saturating_neg(),
            }),
        }),
        Play::Standard | Play::Unwagered { .. } => {
            let victim = if correct {
                steal_victim(team, steal, team_count)?
            } else {
                None
            };
            Ok(ScoringPlan {
                team,
                delta: signed(active.point_value),
                charge: victim.map(|victim| Charge {
                    tag: EntryTag::Steal,
                    team: victim,
                    delta: active.point_value.saturating_neg(),
                }),
            })
        }
    }
}

/// Resolve the team a steal is charged to.
fn steal_victim(thief: TeamId, steal: Steal, team_count: usize) -> Result<Option<TeamId>> {
    match steal {
        Steal::None => Ok(None),
        Steal::Auto if team_count == 2 => Ok(Some(TeamId::new(if thief.0 == 0 { 1 } else { 0 }))),
        Steal::Auto => Err(QuizError::StealVictimRequired),
        Steal::From(victim) if victim == thief || victim.index() >= team_count => {
            Err(QuizError::InvalidStealVictim(victim))
        }
        Steal::From(victim) => Ok(Some(victim)),
    }
}
