//! # quiz-board
//!
//! A scoring and question-state engine for hosting Jeopardy-style quiz games.
//!
//! ## Design Principles
//!
//! 1. **Corrections, Not Accumulation**: Every question keeps its last
//!    decision in a ledger. Deciding the same question again reverses the
//!    earlier delta before applying the new one, so hosts can fix mistakes.
//!
//! 2. **Explicit Lifecycle**: The active question is a single tagged state
//!    (`FlowPhase`). Operations that do not fit the current phase are
//!    rejected instead of silently ignored.
//!
//! 3. **Configuration Over Convention**: Minimum wager, point tiers, team
//!    count, and correction behavior all live in `RulesConfig`.
//!
//! ## Architecture
//!
//! - **Context Object**: `GameSession` owns the board, teams, ledger, and
//!   progress. Nothing is global.
//!
//! - **Persistent Data Structures**: Scored cells and ledger history use
//!   `im-rs`, so sessions clone cheaply for undo or inspection.
//!
//! ## Modules
//!
//! - `core`: Cell keys, rules configuration, RNG
//! - `board`: Questions, categories, and the grid
//! - `teams`: Team IDs and the team registry
//! - `flow`: Question lifecycle, wager bounds, scoring plans
//! - `ledger`: Per-question scoring entries and their history
//! - `progress`: Completion detection and winner
//! - `session`: The game context tying everything together
//! - `snapshot`: Saved-game schema and codecs
//! - `export`: Answer sheets

pub mod core;
pub mod error;
pub mod board;
pub mod teams;
pub mod flow;
pub mod ledger;
pub mod progress;
pub mod session;
pub mod snapshot;
pub mod export;

// Re-export commonly used types
pub use crate::core::{BoardRng, BoardRngState, QuestionKey, RulesConfig};

pub use crate::error::{QuizError, Result};

pub use crate::board::{Board, Category, Question};

pub use crate::teams::{Team, TeamId, TeamRegistry};

pub use crate::flow::{
    ActiveQuestion, Charge, FlowPhase, Play, Steal,
    WagerBounds, WagerReceipt, WagerStep,
};

pub use crate::ledger::{EntryTag, LedgerEntry, LedgerEvent, ScoringLedger};

pub use crate::progress::{GameProgress, GameResult};

pub use crate::session::{DecisionReport, GameSession};

pub use crate::snapshot::{BincodeCodec, GameSnapshot, JsonCodec, SnapshotCodec};

pub use crate::export::{AnswerSheet, AnswerSheetFormat};
