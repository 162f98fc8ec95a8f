//! Game completion: which cells are scored, and who won.

pub mod tracker;

pub use tracker::{GameProgress, GameResult};
