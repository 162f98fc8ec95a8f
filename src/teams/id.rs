//! Team identification.

use serde::{Deserialize, Serialize};

/// Team identifier: the team's 0-based position in the registry.
///
/// Teams are only ever appended or removed from the end, so a `TeamId`
/// keeps addressing the same team for as long as that team exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw team index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all team IDs for a registry with `team_count` teams.
    ///
    /// ```
    /// use quiz_board::teams::TeamId;
    ///
    /// let teams: Vec<_> = TeamId::all(3).collect();
    /// assert_eq!(teams, vec![TeamId::new(0), TeamId::new(1), TeamId::new(2)]);
    /// ```
    pub fn all(team_count: usize) -> impl Iterator<Item = TeamId> {
        (0..team_count as u8).map(TeamId)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team({})", self.0)
    }
}
