//! Play-through progress and win detection.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::core::QuestionKey;
use crate::teams::{TeamId, TeamRegistry};

/// Result of a completed board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Highest-scoring team. Ties go to the team listed first.
    pub winner: TeamId,
    pub name: String,
    pub score: i64,
}

impl GameResult {
    /// Read the current leader off the registry.
    #[must_use]
    pub fn from_teams(teams: &TeamRegistry) -> Self {
        let (winner, team) = teams.leader();
        Self {
            winner,
            name: team.name.clone(),
            score: team.score,
        }
    }

    /// Check if a team won.
    #[must_use]
    pub fn is_winner(&self, team: TeamId) -> bool {
        self.winner == team
    }
}

/// Set of scored cells for the current play-through.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProgress {
    scored: OrdSet<QuestionKey>,
    result: Option<GameResult>,
}

impl GameProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scored cells, in column order.
    #[must_use]
    pub fn scored_keys(&self) -> &OrdSet<QuestionKey> {
        &self.scored
    }

    #[must_use]
    pub fn is_scored(&self, key: QuestionKey) -> bool {
        self.scored.contains(&key)
    }

    #[must_use]
    pub fn scored_count(&self) -> usize {
        self.scored.len()
    }

    /// Result, once every cell has been scored.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// Record a scored cell on a board of `total` cells.
    ///
    /// Returns `true` only when this call completes the board. While the
    /// board stays complete, the result follows every later decision.
    pub fn mark_scored(&mut self, key: QuestionKey, total: usize, teams: &TeamRegistry) -> bool {
        let was_complete = self.is_complete();
        self.scored.insert(key);
        self.refresh(total, teams);
        !was_complete && self.is_complete()
    }

    /// Re-evaluate completion after the board shape or teams changed.
    pub fn refresh(&mut self, total: usize, teams: &TeamRegistry) {
        self.result = (total > 0 && self.scored.len() == total).then(|| GameResult::from_teams(teams));
    }

    /// Drop scored cells outside a `categories` × `rows` board.
    pub fn retain_within(&mut self, categories: usize, rows: usize) {
        self.scored = self
            .scored
            .iter()
            .copied()
            .filter(|key| key.fits(categories, rows))
            .collect();
    }

    /// Start over for a new play-through.
    pub fn reset(&mut self) {
        self.scored.clear();
        self.result = None;
    }
}
