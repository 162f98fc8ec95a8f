//! Core engine types: cell keys, rules configuration, RNG.
//!
//! Everything here is free of game state; the board, teams, and ledger build
//! on these.

pub mod key;
pub mod config;
pub mod rng;

pub use key::QuestionKey;
pub use config::{RulesConfig, MIN_TEAMS};
pub use rng::{BoardRng, BoardRngState};
