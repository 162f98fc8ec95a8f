//! Game session: the explicit context object every operation runs against.

pub mod game;

pub use game::{DecisionReport, GameSession};
