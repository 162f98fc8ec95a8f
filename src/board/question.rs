//! A single board cell.

use serde::{Deserialize, Serialize};

/// One question tile.
///
/// Field names on the wire follow the saved-game format (`question`,
/// `answer`, `isDaily`, ...). Media fields are opaque handles (usually data
/// URIs) that the engine never interprets. Missing text fields load as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Question {
    /// Clue shown to the teams.
    #[serde(rename = "question")]
    pub prompt: String,

    /// Expected response.
    #[serde(rename = "answer")]
    pub response: String,

    /// Optional explanation shown after the answer. Empty means none.
    pub explanation: String,

    pub question_image: String,
    pub answer_image: String,
    pub explanation_image: String,

    /// Face value.
    pub points: i64,

    /// Whether the tile has been opened during the current play-through.
    pub revealed: bool,

    /// Daily Double flag: requires team selection and a wager before play.
    pub is_daily: bool,
}

impl Question {
    /// Create an empty question worth `points`.
    #[must_use]
    pub fn blank(points: i64) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Create a question with a prompt and response.
    pub fn new(prompt: impl Into<String>, response: impl Into<String>, points: i64) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
            points,
            ..Self::default()
        }
    }

    /// Attach an explanation.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Mark as a Daily Double.
    #[must_use]
    pub fn daily(mut self) -> Self {
        self.is_daily = true;
        self
    }

    /// The explanation, if one was written.
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        if self.explanation.is_empty() {
            None
        } else {
            Some(&self.explanation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_question() {
        let q = Question::blank(300);
        assert_eq!(q.points, 300);
        assert!(q.prompt.is_empty());
        assert!(!q.revealed);
        assert!(!q.is_daily);
        assert_eq!(q.explanation(), None);
    }

    #[test]
    fn test_builder() {
        let q = Question::new("Largest planet", "What is Jupiter?", 200)
            .with_explanation("It is a gas giant")
            .daily();
        assert_eq!(q.explanation(), Some("It is a gas giant"));
        assert!(q.is_daily);
    }

    #[test]
    fn test_wire_names() {
        let q = Question::new("Q", "A", 100).daily();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["question"], "Q");
        assert_eq!(json["answer"], "A");
        assert_eq!(json["isDaily"], true);
        assert_eq!(json["questionImage"], "");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let q: Question = serde_json::from_str(r#"{"question": "Q", "points": 400}"#).unwrap();
        assert_eq!(q.prompt, "Q");
        assert_eq!(q.points, 400);
        assert!(q.response.is_empty());
        assert!(q.answer_image.is_empty());
        assert!(!q.revealed);
    }
}
