//! Daily Double wager bounds.
//!
//! Out-of-range wagers are clamped, never rejected.

use serde::{Deserialize, Serialize};

use crate::core::RulesConfig;
use crate::teams::TeamId;

/// Inclusive wager range for one team on one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerBounds {
    pub min: i64,
    pub max: i64,
}

impl WagerBounds {
    /// Bounds for a team holding `team_score` on a tile worth `face_value`.
    ///
    /// The ceiling is the team's score or double the face value, whichever is
    /// larger, so a short bankroll can still wager up to twice the tile.
    ///
    /// ```
    /// use quiz_board::core::RulesConfig;
    /// use quiz_board::flow::WagerBounds;
    ///
    /// let rules = RulesConfig::default();
    /// assert_eq!(WagerBounds::for_team(150, 400, &rules).max, 800);
    /// assert_eq!(WagerBounds::for_team(2500, 400, &rules).max, 2500);
    /// assert_eq!(WagerBounds::for_team(2500, 400, &rules).clamp(-20), 5);
    /// ```
    #[must_use]
    pub fn for_team(team_score: i64, face_value: i64, rules: &RulesConfig) -> Self {
        let min = rules.min_wager;
        let max = team_score.max(face_value.saturating_mul(2)).max(min);
        Self { min, max }
    }

    /// Clamp a requested wager into range.
    #[must_use]
    pub fn clamp(&self, amount: i64) -> i64 {
        amount.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(&self, amount: i64) -> bool {
        (self.min..=self.max).contains(&amount)
    }
}

/// Whether a team with `score` may wager at all.
#[must_use]
pub fn can_wager(score: i64, rules: &RulesConfig) -> bool {
    score >= rules.min_wager
}

/// Outcome of choosing the Daily Double team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WagerStep {
    /// The team may wager within these bounds.
    Wager(WagerBounds),
    /// The team cannot cover the minimum; the tile plays at face value.
    Skipped,
}

/// Record of a confirmed wager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerReceipt {
    pub team: TeamId,
    pub requested: i64,
    pub accepted: i64,
    pub bounds: WagerBounds,
}

impl WagerReceipt {
    /// Whether the requested amount had to be clamped.
    #[must_use]
    pub fn was_clamped(&self) -> bool {
        self.requested != self.accepted
    }
}
