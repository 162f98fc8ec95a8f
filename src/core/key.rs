//! Positional cell addressing.
//!
//! Cells are addressed by `(category, row)` position, never by identity.
//! Structural edits only ever append or drop the last category or row, so a
//! `QuestionKey` stays valid for every sibling cell across edits.

use serde::{Deserialize, Serialize};

/// Grid position of a single question.
///
/// ```
/// use quiz_board::core::QuestionKey;
///
/// let key = QuestionKey::new(2, 4);
/// assert_eq!(key.category, 2);
/// assert_eq!(key.row, 4);
/// assert_eq!(key.to_string(), "2-4");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionKey {
    /// Category (column) index, 0-based.
    pub category: usize,

    /// Row index within the category, 0-based.
    pub row: usize,
}

impl QuestionKey {
    /// Create a new key.
    #[must_use]
    pub const fn new(category: usize, row: usize) -> Self {
        Self { category, row }
    }

    /// Check whether this key addresses a cell on a `categories` × `rows` board.
    #[must_use]
    pub const fn fits(self, categories: usize, rows: usize) -> bool {
        self.category < categories && self.row < rows
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.category, self.row)
    }
}

impl From<(usize, usize)> for QuestionKey {
    fn from((category, row): (usize, usize)) -> Self {
        Self::new(category, row)
    }
}
