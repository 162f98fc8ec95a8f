//! The scoring ledger.
//!
//! Each question keeps at most one primary entry. Recording a new primary
//! entry reverses the old one first, so scoring a question again replaces
//! its effect instead of accumulating it. Auxiliary entries (wager losses,
//! steal penalties) sit beside the primary entry and are only reversed on
//! request.
//!
//! Every application and reversal is also appended to an immutable history
//! for audit and replay.

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::entry::{EntryTag, EventKind, LedgerEntry, LedgerEvent, TaggedEntry};
use crate::core::QuestionKey;
use crate::error::{QuizError, Result};
use crate::teams::{TeamId, TeamRegistry};

/// Live entries for one question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionRecord {
    pub primary: Option<LedgerEntry>,
    pub auxiliary: SmallVec<[TaggedEntry; 2]>,
}

impl QuestionRecord {
    fn is_empty(&self) -> bool {
        self.primary.is_none() && self.auxiliary.is_empty()
    }
}

/// Per-question record of applied scoring decisions.
///
/// ```
/// use quiz_board::core::QuestionKey;
/// use quiz_board::ledger::ScoringLedger;
/// use quiz_board::teams::{TeamId, TeamRegistry};
///
/// let mut teams = TeamRegistry::new(2, |i| format!("Team {}", i + 1));
/// let mut ledger = ScoringLedger::new();
/// let key = QuestionKey::new(0, 0);
///
/// ledger.record_and_apply(key, TeamId::new(0), 200, &mut teams).unwrap();
/// ledger.record_and_apply(key, TeamId::new(1), 200, &mut teams).unwrap();
/// assert_eq!(teams.scores(), vec![0, 200]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScoringLedger {
    records: FxHashMap<QuestionKey, QuestionRecord>,
    history: Vector<LedgerEvent>,
}

impl ScoringLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary entry for a question.
    #[must_use]
    pub fn get(&self, key: QuestionKey) -> Option<&LedgerEntry> {
        self.records.get(&key).and_then(|r| r.primary.as_ref())
    }

    /// Live auxiliary entries for a question.
    #[must_use]
    pub fn auxiliaries(&self, key: QuestionKey) -> &[TaggedEntry] {
        self.records
            .get(&key)
            .map(|r| r.auxiliary.as_slice())
            .unwrap_or(&[])
    }

    /// What the live entries for `key` currently add to `team`'s score.
    ///
    /// Counts the primary entry, plus auxiliary entries when
    /// `include_auxiliary` is set. These are the entries a new decision on
    /// `key` would reverse.
    #[must_use]
    pub fn net_delta(&self, key: QuestionKey, team: TeamId, include_auxiliary: bool) -> i64 {
        let Some(record) = self.records.get(&key) else {
            return 0;
        };
        let primary = record
            .primary
            .filter(|e| e.team == team)
            .map_or(0, |e| e.delta);
        if !include_auxiliary {
            return primary;
        }
        record
            .auxiliary
            .iter()
            .filter(|t| t.entry.team == team)
            .fold(primary, |sum, t| sum.saturating_add(t.entry.delta))
    }

    /// Full application/reversal history, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<LedgerEvent> {
        &self.history
    }

    /// Number of questions with live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply `delta` to `team` as the decision for `key`, first reversing any
    /// earlier decision for the same question.
    ///
    /// Returns the replaced entry. Fails without side effects if `team` is
    /// not in the registry.
    pub fn record_and_apply(
        &mut self,
        key: QuestionKey,
        team: TeamId,
        delta: i64,
        teams: &mut TeamRegistry,
    ) -> Result<Option<LedgerEntry>> {
        teams.check(team)?;
        let previous = self.records.get(&key).and_then(|r| r.primary);
        if let Some(prev) = previous {
            teams.apply_delta(prev.team, prev.delta.saturating_neg())?;
            self.log(key, EntryTag::Primary, EventKind::Reversed, prev);
        }

        let entry = LedgerEntry::new(team, delta);
        teams.apply_delta(team, delta)?;
        self.log(key, EntryTag::Primary, EventKind::Applied, entry);
        self.records.entry(key).or_default().primary = Some(entry);
        Ok(previous)
    }

    /// Apply a tagged side entry for `key`. Never touches the primary entry.
    pub fn record_auxiliary(
        &mut self,
        key: QuestionKey,
        tag: EntryTag,
        team: TeamId,
        delta: i64,
        teams: &mut TeamRegistry,
    ) -> Result<()> {
        if tag == EntryTag::Primary {
            return Err(QuizError::InvariantViolation(
                "auxiliary entries cannot use the primary tag".into(),
            ));
        }
        let entry = LedgerEntry::new(team, delta);
        teams.apply_delta(team, delta)?;
        self.log(key, tag, EventKind::Applied, entry);
        self.records
            .entry(key)
            .or_default()
            .auxiliary
            .push(TaggedEntry { tag, entry });
        Ok(())
    }

    /// Undo every auxiliary entry for `key`. Returns how many were reversed.
    pub fn reverse_auxiliaries(&mut self, key: QuestionKey, teams: &mut TeamRegistry) -> Result<usize> {
        let Some(record) = self.records.get_mut(&key) else {
            return Ok(0);
        };
        for tagged in &record.auxiliary {
            teams.check(tagged.entry.team)?;
        }

        let drained: SmallVec<[TaggedEntry; 2]> = record.auxiliary.drain(..).collect();
        if record.is_empty() {
            self.records.remove(&key);
        }
        for tagged in &drained {
            teams.apply_delta(tagged.entry.team, tagged.entry.delta.saturating_neg())?;
            self.log(key, tagged.tag, EventKind::Reversed, tagged.entry);
        }
        Ok(drained.len())
    }

    /// Drop every live entry that charges `team`. Scores are not touched.
    ///
    /// Used when a team leaves the game, so later corrections never reach it.
    pub fn forget_team(&mut self, team: TeamId) -> usize {
        let mut dropped = 0;
        for record in self.records.values_mut() {
            if record.primary.is_some_and(|e| e.team == team) {
                record.primary = None;
                dropped += 1;
            }
            let before = record.auxiliary.len();
            record.auxiliary.retain(|t| t.entry.team != team);
            dropped += before - record.auxiliary.len();
        }
        self.records.retain(|_, r| !r.is_empty());
        dropped
    }

    /// Drop records for cells outside a `categories` × `rows` board.
    pub fn retain_within(&mut self, categories: usize, rows: usize) {
        self.records.retain(|key, _| key.fits(categories, rows));
    }

    /// Forget everything, history included.
    pub fn clear(&mut self) {
        self.records.clear();
        self.history.clear();
    }

    fn log(&mut self, key: QuestionKey, tag: EntryTag, kind: EventKind, entry: LedgerEntry) {
        self.history.push_back(LedgerEvent { key, tag, kind, entry });
    }
}
