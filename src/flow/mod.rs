//! Question flow: lifecycle phases, wager bounds, and scoring rules.
//!
//! The phases form a tagged union so that no invalid flag combination (a
//! wager with no wagering team, an answer shown before the wager) can be
//! represented. Transitions are driven by `GameSession`.

pub mod phase;
pub mod wager;
pub mod scoring;

pub use phase::{ActiveQuestion, FlowPhase, Play};
pub use wager::{can_wager, WagerBounds, WagerReceipt, WagerStep};
pub use scoring::{plan, Charge, ScoringPlan, Steal};
