//! Saved-game schema.
//!
//! ```json
//! {
//!   "name": "Friday Quiz",
//!   "categories": ["Science", "History"],
//!   "questions": [[{ "question": "...", "answer": "...", "points": 100, "isDaily": false }]],
//!   "teamNames": ["Team 1", "Team 2"]
//! }
//! ```
//!
//! Older saves kept media in a parallel `images` grid; it is merged into the
//! questions on load.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Category, Question};
use crate::error::{QuizError, Result};
use crate::teams::TeamRegistry;

/// Media handles for one cell in the legacy `images` grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaSet {
    pub question_image: String,
    pub answer_image: String,
    pub explanation_image: String,
}

/// Serializable board + team names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSnapshot {
    pub name: String,
    pub categories: Vec<String>,
    pub questions: Vec<Vec<Question>>,
    pub images: Option<Vec<Vec<MediaSet>>>,
    pub team_names: Option<Vec<String>>,
}

/// A validated snapshot, ready to install into a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotParts {
    pub name: String,
    pub board: Board,
    pub team_names: Option<Vec<String>>,
}

impl GameSnapshot {
    /// Capture a board and its teams.
    #[must_use]
    pub fn capture(name: &str, board: &Board, teams: &TeamRegistry) -> Self {
        Self {
            name: name.to_string(),
            categories: board.category_names(),
            questions: board.categories().iter().map(|c| c.questions.clone()).collect(),
            images: None,
            team_names: Some(teams.names()),
        }
    }

    /// Validate and convert into a board.
    ///
    /// `min_teams` applies to `teamNames` when present.
    pub fn into_parts(self, min_teams: usize) -> Result<SnapshotParts> {
        if self.categories.len() != self.questions.len() {
            return Err(QuizError::MalformedSnapshot(format!(
                "{} category names for {} question columns",
                self.categories.len(),
                self.questions.len()
            )));
        }

        let mut questions = self.questions;
        if let Some(images) = self.images {
            merge_images(&mut questions, images)?;
        }

        let categories = self
            .categories
            .into_iter()
            .zip(questions)
            .map(|(name, qs)| Category::new(name, qs))
            .collect();
        let board = Board::from_categories(categories)?;

        if let Some(names) = &self.team_names {
            if names.len() < min_teams {
                return Err(QuizError::MalformedSnapshot(format!(
                    "{} team names, need at least {}",
                    names.len(),
                    min_teams
                )));
            }
        }

        Ok(SnapshotParts {
            name: self.name,
            board,
            team_names: self.team_names,
        })
    }
}

fn merge_images(questions: &mut [Vec<Question>], images: Vec<Vec<MediaSet>>) -> Result<()> {
    if images.len() != questions.len() {
        return Err(QuizError::MalformedSnapshot(
            "image grid does not match question grid".into(),
        ));
    }
    for (column, media) in questions.iter_mut().zip(images) {
        if media.len() != column.len() {
            return Err(QuizError::MalformedSnapshot(
                "image grid does not match question grid".into(),
            ));
        }
        for (q, m) in column.iter_mut().zip(media) {
            q.question_image = m.question_image;
            q.answer_image = m.answer_image;
            q.explanation_image = m.explanation_image;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{QuestionKey, RulesConfig};

    #[test]
    fn test_capture_and_restore() {
        let rules = RulesConfig::default();
        let mut board = Board::generated(2, 2, &rules);
        board.rename_category(1, "Rivers").unwrap();
        board.question_mut(QuestionKey::new(1, 0)).unwrap().prompt = "Longest river".into();
        let teams = TeamRegistry::from_names(["A", "B", "C"], 2).unwrap();

        let snap = GameSnapshot::capture("Night 1", &board, &teams);
        assert_eq!(snap.categories, vec!["", "Rivers"]);

        let parts = snap.into_parts(2).unwrap();
        assert_eq!(parts.board, board);
        assert_eq!(parts.name, "Night 1");
        assert_eq!(parts.team_names.unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_name_count_mismatch() {
        let snap = GameSnapshot {
            categories: vec!["One".into(), "Two".into()],
            questions: vec![vec![Question::blank(100)]],
            ..GameSnapshot::default()
        };
        assert!(matches!(snap.into_parts(2), Err(QuizError::MalformedSnapshot(_))));
    }

    #[test]
    fn test_empty_snapshot_is_malformed() {
        assert!(GameSnapshot::default().into_parts(2).is_err());
    }

    #[test]
    fn test_too_few_team_names() {
        let snap = GameSnapshot {
            categories: vec!["One".into()],
            questions: vec![vec![Question::blank(100)]],
            team_names: Some(vec!["Alone".into()]),
            ..GameSnapshot::default()
        };
        assert!(matches!(snap.into_parts(2), Err(QuizError::MalformedSnapshot(_))));
    }

    #[test]
    fn test_legacy_images_merge() {
        let snap = GameSnapshot {
            categories: vec!["Art".into()],
            questions: vec![vec![Question::blank(100), Question::blank(200)]],
            images: Some(vec![vec![
                MediaSet {
                    question_image: "data:image/png;base64,AAA".into(),
                    ..MediaSet::default()
                },
                MediaSet::default(),
            ]]),
            ..GameSnapshot::default()
        };
        let parts = snap.into_parts(2).unwrap();
        let q = parts.board.question(QuestionKey::new(0, 0)).unwrap();
        assert_eq!(q.question_image, "data:image/png;base64,AAA");
        assert!(q.answer_image.is_empty());
    }

    #[test]
    fn test_legacy_images_shape_checked() {
        let snap = GameSnapshot {
            categories: vec!["Art".into()],
            questions: vec![vec![Question::blank(100)]],
            images: Some(vec![vec![]]),
            ..GameSnapshot::default()
        };
        assert!(snap.into_parts(2).is_err());
    }
}
