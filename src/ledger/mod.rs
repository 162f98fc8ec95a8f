//! Scoring ledger: the last decision per question, plus side charges.

pub mod entry;
pub mod book;

pub use entry::{EntryTag, EventKind, LedgerEntry, LedgerEvent, TaggedEntry};
pub use book::{QuestionRecord, ScoringLedger};
