//! The categories × rows grid.
//!
//! ## Invariants
//!
//! - At least one category.
//! - Every category has the same number of rows, and at least one.
//!
//! Structural edits only touch the last category or the last row, so the
//! `(category, row)` address of every remaining cell is stable.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::question::Question;
use crate::core::{BoardRng, QuestionKey, RulesConfig};
use crate::error::{QuizError, Result};
use crate::flow::ActiveQuestion;

/// Rectangular board of questions.
///
/// ```
/// use quiz_board::board::Board;
/// use quiz_board::core::{QuestionKey, RulesConfig};
///
/// let rules = RulesConfig::default();
/// let mut board = Board::with_defaults(&rules);
/// assert_eq!((board.category_count(), board.row_count()), (6, 5));
///
/// board.add_question_row(&rules);
/// assert_eq!(board.question(QuestionKey::new(3, 5)).unwrap().points, 600);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Board {
    categories: Vec<Category>,
}

impl Board {
    /// Default board: `default_categories` × `default_rows` blank cells.
    #[must_use]
    pub fn with_defaults(rules: &RulesConfig) -> Self {
        Self::generated(rules.default_categories.max(1), rules.default_rows.max(1), rules)
    }

    /// Blank `categories` × `rows` board on the standard point tiers.
    #[must_use]
    pub fn generated(categories: usize, rows: usize, rules: &RulesConfig) -> Self {
        assert!(categories > 0, "A board needs at least 1 category");
        assert!(rows > 0, "A category needs at least 1 row");
        Self {
            categories: (0..categories).map(|_| Category::generated(rows, rules)).collect(),
        }
    }

    /// Build a board from explicit categories, checking the grid invariants.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self> {
        let Some(first) = categories.first() else {
            return Err(QuizError::MalformedSnapshot("board has no categories".into()));
        };
        let rows = first.len();
        if rows == 0 {
            return Err(QuizError::MalformedSnapshot("categories have no questions".into()));
        }
        if let Some((index, cat)) = categories.iter().enumerate().find(|(_, c)| c.len() != rows) {
            return Err(QuizError::MalformedSnapshot(format!(
                "category {} has {} questions, expected {}",
                index,
                cat.len(),
                rows
            )));
        }
        Ok(Self { categories })
    }

    // === Shape ===

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.categories.first().map_or(0, Category::len)
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.category_count() * self.row_count()
    }

    /// Whether `key` addresses a cell on this board.
    #[must_use]
    pub fn contains(&self, key: QuestionKey) -> bool {
        key.fits(self.category_count(), self.row_count())
    }

    fn check(&self, key: QuestionKey) -> Result<()> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(QuizError::CellOutOfRange {
                category: key.category,
                row: key.row,
            })
        }
    }

    // === Access ===

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in column order.
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn question(&self, key: QuestionKey) -> Result<&Question> {
        self.check(key)?;
        Ok(&self.categories[key.category].questions[key.row])
    }

    /// Mutable access for authoring. Cannot change the grid shape.
    pub fn question_mut(&mut self, key: QuestionKey) -> Result<&mut Question> {
        self.check(key)?;
        Ok(&mut self.categories[key.category].questions[key.row])
    }

    /// Iterate over every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (QuestionKey, &Question)> {
        self.categories.iter().enumerate().flat_map(|(c, cat)| {
            cat.questions
                .iter()
                .enumerate()
                .map(move |(r, q)| (QuestionKey::new(c, r), q))
        })
    }

    pub fn rename_category(&mut self, category: usize, name: impl Into<String>) -> Result<()> {
        self.check(QuestionKey::new(category, 0))?;
        self.categories[category].name = name.into();
        Ok(())
    }

    pub fn set_daily(&mut self, key: QuestionKey, is_daily: bool) -> Result<()> {
        self.question_mut(key)?.is_daily = is_daily;
        Ok(())
    }

    // === Play ===

    /// Open a cell for play.
    ///
    /// Ordinary cells are marked revealed immediately. Daily Doubles stay
    /// unrevealed until a team is chosen and, where applicable, a wager is
    /// confirmed.
    pub fn reveal_cell(&mut self, key: QuestionKey, allow_replay: bool) -> Result<ActiveQuestion> {
        let question = self.question_mut(key)?;
        if question.revealed && !allow_replay {
            return Err(QuizError::CellAlreadyRevealed {
                category: key.category,
                row: key.row,
            });
        }
        if !question.is_daily {
            question.revealed = true;
        }
        Ok(ActiveQuestion::from_cell(key, question))
    }

    pub fn mark_revealed(&mut self, key: QuestionKey) -> Result<()> {
        self.question_mut(key)?.revealed = true;
        Ok(())
    }

    /// Clear every `revealed` flag, leaving content and points alone.
    pub fn reset_revealed_flags(&mut self) {
        for cat in &mut self.categories {
            for q in &mut cat.questions {
                q.revealed = false;
            }
        }
    }

    /// Clear all Daily Double flags and place `count` of them on random cells.
    ///
    /// Returns the chosen cells in column order.
    pub fn scatter_daily_doubles(&mut self, rng: &mut BoardRng, count: usize) -> Vec<QuestionKey> {
        let rows = self.row_count();
        for cat in &mut self.categories {
            for q in &mut cat.questions {
                q.is_daily = false;
            }
        }

        let mut picked: Vec<QuestionKey> = rng
            .sample_distinct(self.total_cells(), count)
            .into_iter()
            .map(|i| QuestionKey::new(i / rows, i % rows))
            .collect();
        picked.sort();

        for key in &picked {
            self.categories[key.category].questions[key.row].is_daily = true;
        }
        picked
    }

    // === Structure ===

    /// Append a blank category with one cell per existing row.
    pub fn add_category(&mut self, rules: &RulesConfig) {
        self.categories.push(Category::generated(self.row_count(), rules));
    }

    /// Remove the last category. No-op when only one remains.
    pub fn remove_category(&mut self) -> bool {
        if self.categories.len() <= 1 {
            return false;
        }
        self.categories.pop();
        true
    }

    /// Append one row across all categories on the next point tier.
    pub fn add_question_row(&mut self, rules: &RulesConfig) {
        let points = rules.tier_points(self.row_count());
        for cat in &mut self.categories {
            cat.questions.push(Question::blank(points));
        }
    }

    /// Remove the last row from every category. No-op at one row.
    pub fn remove_question_row(&mut self) -> bool {
        if self.row_count() <= 1 {
            return false;
        }
        for cat in &mut self.categories {
            cat.questions.pop();
        }
        true
    }
}

impl TryFrom<Vec<Category>> for Board {
    type Error = QuizError;

    fn try_from(categories: Vec<Category>) -> Result<Self> {
        Self::from_categories(categories)
    }
}

impl From<Board> for Vec<Category> {
    fn from(board: Board) -> Self {
        board.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RulesConfig {
        RulesConfig::default()
    }

    #[test]
    fn test_default_board() {
        let board = Board::with_defaults(&rules());
        assert_eq!(board.category_count(), 6);
        assert_eq!(board.row_count(), 5);
        assert_eq!(board.total_cells(), 30);
        assert_eq!(board.question(QuestionKey::new(5, 4)).unwrap().points, 500);
    }

    #[test]
    fn test_out_of_range() {
        let board = Board::generated(2, 2, &rules());
        assert_eq!(
            board.question(QuestionKey::new(2, 0)).unwrap_err(),
            QuizError::CellOutOfRange { category: 2, row: 0 }
        );
        assert!(board.question(QuestionKey::new(0, 2)).is_err());
    }

    #[test]
    fn test_from_categories_rejects_ragged() {
        let good = Category::generated(3, &rules());
        let short = Category::generated(2, &rules());
        assert!(matches!(
            Board::from_categories(vec![good.clone(), short]),
            Err(QuizError::MalformedSnapshot(_))
        ));
        assert!(Board::from_categories(vec![]).is_err());
        assert!(Board::from_categories(vec![Category::default()]).is_err());
        assert!(Board::from_categories(vec![good.clone(), good]).is_ok());
    }

    #[test]
    fn test_reveal_ordinary_cell_marks_revealed() {
        let mut board = Board::generated(2, 2, &rules());
        let key = QuestionKey::new(1, 1);
        let active = board.reveal_cell(key, true).unwrap();
        assert_eq!(active.point_value, 200);
        assert!(!active.is_daily);
        assert!(board.question(key).unwrap().revealed);
    }

    #[test]
    fn test_reveal_daily_double_defers_flag() {
        let mut board = Board::generated(1, 2, &rules());
        let key = QuestionKey::new(0, 0);
        board.set_daily(key, true).unwrap();

        let active = board.reveal_cell(key, true).unwrap();
        assert!(active.is_daily);
        assert!(!board.question(key).unwrap().revealed);
    }

    #[test]
    fn test_replay_rules() {
        let mut board = Board::generated(1, 1, &rules());
        let key = QuestionKey::new(0, 0);
        board.reveal_cell(key, false).unwrap();

        assert!(board.reveal_cell(key, true).is_ok());
        assert_eq!(
            board.reveal_cell(key, false).unwrap_err(),
            QuizError::CellAlreadyRevealed { category: 0, row: 0 }
        );
    }

    #[test]
    fn test_reset_revealed_flags_keeps_content() {
        let mut board = Board::generated(2, 2, &rules());
        let key = QuestionKey::new(0, 1);
        board.question_mut(key).unwrap().prompt = "Capital of Peru".into();
        board.reveal_cell(key, true).unwrap();

        board.reset_revealed_flags();
        let q = board.question(key).unwrap();
        assert!(!q.revealed);
        assert_eq!(q.prompt, "Capital of Peru");
        assert_eq!(q.points, 200);
    }

    #[test]
    fn test_category_bounds() {
        let mut board = Board::generated(2, 3, &rules());
        board.add_category(&rules());
        assert_eq!(board.category_count(), 3);
        assert_eq!(board.categories()[2].len(), 3);

        assert!(board.remove_category());
        assert!(board.remove_category());
        assert!(!board.remove_category());
        assert_eq!(board.category_count(), 1);
    }

    #[test]
    fn test_row_bounds_stay_rectangular() {
        let mut board = Board::generated(3, 2, &rules());
        board.add_question_row(&rules());
        assert!(board.categories().iter().all(|c| c.len() == 3));
        assert_eq!(board.question(QuestionKey::new(2, 2)).unwrap().points, 300);

        assert!(board.remove_question_row());
        assert!(board.remove_question_row());
        assert!(!board.remove_question_row());
        assert!(board.categories().iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_structural_edits_preserve_sibling_addresses() {
        let mut board = Board::generated(2, 2, &rules());
        let key = QuestionKey::new(0, 1);
        board.question_mut(key).unwrap().response = "Lima".into();

        board.add_category(&rules());
        board.add_question_row(&rules());
        board.remove_category();
        assert_eq!(board.question(key).unwrap().response, "Lima");
    }

    #[test]
    fn test_scatter_daily_doubles() {
        let mut board = Board::generated(6, 5, &rules());
        board.set_daily(QuestionKey::new(0, 0), true).unwrap();

        let mut rng = BoardRng::new(99);
        let picked = board.scatter_daily_doubles(&mut rng, 3);
        assert_eq!(picked.len(), 3);

        let flagged: Vec<_> = board.cells().filter(|(_, q)| q.is_daily).map(|(k, _)| k).collect();
        assert_eq!(flagged, picked);

        let mut again = Board::generated(6, 5, &rules());
        assert_eq!(again.scatter_daily_doubles(&mut BoardRng::new(99), 3), picked);
    }

    #[test]
    fn test_cells_iterates_column_major() {
        let board = Board::generated(2, 2, &rules());
        let keys: Vec<_> = board.cells().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["0-0", "0-1", "1-0", "1-1"]);
    }

    #[test]
    fn test_deserialize_checks_grid() {
        let board = Board::generated(2, 3, &rules());
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);

        assert!(serde_json::from_str::<Board>("[]").is_err());
        let empty_column = r#"[{"name": "A", "questions": []}]"#;
        assert!(serde_json::from_str::<Board>(empty_column).is_err());
        let ragged = r#"[
            {"name": "A", "questions": [{"points": 100}, {"points": 200}]},
            {"name": "B", "questions": [{"points": 100}]}
        ]"#;
        let err = serde_json::from_str::<Board>(ragged).unwrap_err();
        assert!(err.to_string().contains("category 1 has 1 questions"));
    }
}
