//! Rules configuration.
//!
//! House rules vary between quiz nights, so every constant the engine relies
//! on lives in `RulesConfig` rather than being hardcoded.

use serde::{Deserialize, Serialize};

use crate::teams::MAX_TEAMS;

/// Fewest teams a game can be played with.
pub const MIN_TEAMS: usize = 2;

/// Tunable game rules.
///
/// ```
/// use quiz_board::core::RulesConfig;
///
/// let rules = RulesConfig::default().with_min_wager(10).with_default_rows(3);
/// assert_eq!(rules.min_wager, 10);
/// assert_eq!(rules.tier_points(2), 300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Smallest accepted wager. A team needs at least this much to wager at all.
    pub min_wager: i64,

    /// The registry never drops below this many teams.
    pub min_teams: usize,

    /// Point step between rows of a generated category: row `r` is worth `(r + 1) * point_step`.
    pub point_step: i64,

    /// Rows in a freshly generated category.
    pub default_rows: usize,

    /// Categories on a default board.
    pub default_categories: usize,

    /// Whether an already revealed cell may be opened again.
    /// Re-opening is how an operator corrects a scoring mistake.
    pub allow_replay: bool,

    /// Reverse wager-loss and steal penalties together with the primary
    /// decision when a question is re-scored. `false` leaves stale penalties
    /// in place, matching the classic house rules.
    pub reverse_auxiliary_on_correction: bool,

    /// Prefix for generated team names ("Team 1", "Team 2", ...).
    pub team_name_prefix: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_wager: 5,
            min_teams: 2,
            point_step: 100,
            default_rows: 5,
            default_categories: 6,
            allow_replay: true,
            reverse_auxiliary_on_correction: true,
            team_name_prefix: "Team".to_string(),
        }
    }
}

impl RulesConfig {
    /// Point value of a generated cell in `row`.
    #[must_use]
    pub fn tier_points(&self, row: usize) -> i64 {
        (row as i64 + 1).saturating_mul(self.point_step)
    }

    /// Default name for the team at 0-based `index`.
    #[must_use]
    pub fn team_name(&self, index: usize) -> String {
        format!("{} {}", self.team_name_prefix, index + 1)
    }

    #[must_use]
    pub fn with_min_wager(mut self, min_wager: i64) -> Self {
        self.min_wager = min_wager;
        self
    }

    #[must_use]
    pub fn with_point_step(mut self, step: i64) -> Self {
        self.point_step = step;
        self
    }

    /// Rows in a generated category. Values below 1 become 1.
    #[must_use]
    pub fn with_default_rows(mut self, rows: usize) -> Self {
        self.default_rows = rows.max(1);
        self
    }

    /// Categories on a default board. Values below 1 become 1.
    #[must_use]
    pub fn with_default_categories(mut self, categories: usize) -> Self {
        self.default_categories = categories.max(1);
        self
    }

    /// Pull loaded values back into range: `min_teams` within
    /// `MIN_TEAMS..=MAX_TEAMS`, at least one default row and category.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.min_teams = self.min_teams.clamp(MIN_TEAMS, MAX_TEAMS);
        self.default_rows = self.default_rows.max(1);
        self.default_categories = self.default_categories.max(1);
        self
    }

    /// Disallow re-opening revealed cells.
    #[must_use]
    pub fn without_replay(mut self) -> Self {
        self.allow_replay = false;
        self
    }

    /// Keep auxiliary penalties when a question is re-scored.
    #[must_use]
    pub fn with_legacy_corrections(mut self) -> Self {
        self.reverse_auxiliary_on_correction = false;
        self
    }

    #[must_use]
    pub fn with_team_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.team_name_prefix = prefix.into();
        self
    }
}
