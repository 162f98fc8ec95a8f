//! Ordered team list with scores.
//!
//! Scores move through two paths only: `apply_delta` (driven by the scoring
//! ledger) and `set_score` (manual correction by the operator).

use serde::{Deserialize, Serialize};

use super::id::TeamId;
use crate::error::{QuizError, Result};

/// Registry-wide ceiling, matching the `u8` range of `TeamId`.
pub const MAX_TEAMS: usize = 255;

/// A competing team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub score: i64,
}

impl Team {
    /// Create a team with a score of 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }
}

/// Ordered teams, never fewer than `min_teams`.
///
/// ```
/// use quiz_board::teams::{TeamId, TeamRegistry};
///
/// let mut teams = TeamRegistry::new(2, |i| format!("Team {}", i + 1));
/// let third = teams.add_team(|i| format!("Team {}", i + 1));
/// assert_eq!(third, Some(TeamId::new(2)));
/// assert_eq!(teams.len(), 3);
///
/// teams.apply_delta(TeamId::new(2), -300).unwrap();
/// assert_eq!(teams.score(TeamId::new(2)).unwrap(), -300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRegistry {
    teams: Vec<Team>,
    min_teams: usize,
}

impl TeamRegistry {
    /// Create `min_teams` teams named by `name_for(index)`.
    ///
    /// `min_teams` is clamped into `1..=MAX_TEAMS`.
    pub fn new(min_teams: usize, name_for: impl Fn(usize) -> String) -> Self {
        let min_teams = min_teams.clamp(1, MAX_TEAMS);

        Self {
            teams: (0..min_teams).map(|i| Team::new(name_for(i))).collect(),
            min_teams,
        }
    }

    /// Create a registry from explicit names. Every team starts at 0.
    pub fn from_names<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        min_teams: usize,
    ) -> Result<Self> {
        let teams: Vec<Team> = names.into_iter().map(Team::new).collect();
        if teams.len() < min_teams {
            return Err(QuizError::InvariantViolation(format!(
                "need at least {} teams, got {}",
                min_teams,
                teams.len()
            )));
        }
        if teams.len() > MAX_TEAMS {
            return Err(QuizError::InvariantViolation(format!(
                "at most {} teams supported, got {}",
                MAX_TEAMS,
                teams.len()
            )));
        }
        Ok(Self { teams, min_teams })
    }

    /// Number of teams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Always false; the registry keeps at least one team.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Validate a team ID against the current registry.
    pub fn check(&self, team: TeamId) -> Result<()> {
        if team.index() < self.teams.len() {
            Ok(())
        } else {
            Err(QuizError::TeamOutOfRange {
                index: team.index(),
                team_count: self.teams.len(),
            })
        }
    }

    /// Get a team.
    pub fn get(&self, team: TeamId) -> Result<&Team> {
        self.check(team)?;
        Ok(&self.teams[team.index()])
    }

    /// Get a team's score.
    pub fn score(&self, team: TeamId) -> Result<i64> {
        self.get(team).map(|t| t.score)
    }

    /// All scores in registry order.
    #[must_use]
    pub fn scores(&self) -> Vec<i64> {
        self.teams.iter().map(|t| t.score).collect()
    }

    /// All team names in registry order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.name.clone()).collect()
    }

    /// Iterate over (TeamId, &Team) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &Team)> {
        self.teams
            .iter()
            .enumerate()
            .map(|(i, t)| (TeamId(i as u8), t))
    }

    /// Iterate over all team IDs.
    pub fn team_ids(&self) -> impl Iterator<Item = TeamId> {
        TeamId::all(self.teams.len())
    }

    /// Append a team with a score of 0, named by `name_for(index)`.
    ///
    /// Returns `None` without adding anything once `MAX_TEAMS` is reached.
    pub fn add_team(&mut self, name_for: impl FnOnce(usize) -> String) -> Option<TeamId> {
        if self.teams.len() >= MAX_TEAMS {
            return None;
        }
        let index = self.teams.len();
        self.teams.push(Team::new(name_for(index)));
        Some(TeamId(index as u8))
    }

    /// Remove the last team. No-op at the minimum team count.
    ///
    /// Returns the removed team's ID, if any.
    pub fn remove_team(&mut self) -> Option<TeamId> {
        if self.teams.len() <= self.min_teams {
            return None;
        }
        self.teams.pop();
        Some(TeamId(self.teams.len() as u8))
    }

    /// Rename a team.
    pub fn rename(&mut self, team: TeamId, name: impl Into<String>) -> Result<()> {
        self.check(team)?;
        self.teams[team.index()].name = name.into();
        Ok(())
    }

    /// Overwrite a team's score. Bypasses the ledger.
    pub fn set_score(&mut self, team: TeamId, score: i64) -> Result<()> {
        self.check(team)?;
        self.teams[team.index()].score = score;
        Ok(())
    }

    /// Add `delta` to a team's score. Scores may go negative and saturate
    /// at the `i64` limits.
    pub fn apply_delta(&mut self, team: TeamId, delta: i64) -> Result<()> {
        self.check(team)?;
        let score = &mut self.teams[team.index()].score;
        *score = score.saturating_add(delta);
        Ok(())
    }

    /// Reset every score to 0.
    pub fn reset_scores(&mut self) {
        for team in &mut self.teams {
            team.score = 0;
        }
    }

    /// Team with the highest score. Ties go to the team listed first.
    #[must_use]
    pub fn leader(&self) -> (TeamId, &Team) {
        let mut best = 0;
        for (i, team) in self.teams.iter().enumerate().skip(1) {
            if team.score > self.teams[best].score {
                best = i;
            }
        }
        (TeamId(best as u8), &self.teams[best])
    }
}
