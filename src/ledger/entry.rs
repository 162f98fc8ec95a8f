//! Ledger records.

use serde::{Deserialize, Serialize};

use crate::core::QuestionKey;
use crate::teams::TeamId;

/// Role of an entry within a question's record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryTag {
    /// The scoring decision itself. At most one per question.
    Primary,
    /// Wager lost to another team's correct answer.
    Wager,
    /// Penalty charged to the victim of a steal.
    Steal,
}

impl EntryTag {
    /// Suffix used when the entry is keyed as text (`"3-1-wager"`).
    #[must_use]
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            EntryTag::Primary => None,
            EntryTag::Wager => Some("wager"),
            EntryTag::Steal => Some("steal"),
        }
    }
}

/// A score change charged to one team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub team: TeamId,
    pub delta: i64,
}

impl LedgerEntry {
    #[must_use]
    pub const fn new(team: TeamId, delta: i64) -> Self {
        Self { team, delta }
    }
}

/// An auxiliary entry with its tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedEntry {
    pub tag: EntryTag,
    pub entry: LedgerEntry,
}

/// What happened to an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Applied,
    Reversed,
}

/// One line of the audit history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub key: QuestionKey,
    pub tag: EntryTag,
    pub kind: EventKind,
    /// The entry as recorded. For reversals the score moved by `-entry.delta`.
    pub entry: LedgerEntry,
}

impl LedgerEvent {
    /// Net change this event made to `entry.team`'s score.
    #[must_use]
    pub fn score_change(&self) -> i64 {
        match self.kind {
            EventKind::Applied => self.entry.delta,
            EventKind::Reversed => self.entry.delta.saturating_neg(),
        }
    }

    /// Text key in `category-row[-suffix]` form.
    #[must_use]
    pub fn label(&self) -> String {
        match self.tag.suffix() {
            Some(suffix) => format!("{}-{}", self.key, suffix),
            None => self.key.to_string(),
        }
    }
}
