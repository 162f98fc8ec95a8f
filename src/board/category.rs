//! A board column.

use serde::{Deserialize, Serialize};

use super::question::Question;
use crate::core::RulesConfig;

/// Named column of questions, ordered top (cheapest) to bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub questions: Vec<Question>,
}

impl Category {
    /// Create a category from explicit questions.
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }

    /// Create an empty-named category with `rows` blank questions on the
    /// standard point tiers.
    #[must_use]
    pub fn generated(rows: usize, rules: &RulesConfig) -> Self {
        Self {
            name: String::new(),
            questions: (0..rows).map(|r| Question::blank(rules.tier_points(r))).collect(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tiers() {
        let cat = Category::generated(5, &RulesConfig::default());
        let points: Vec<_> = cat.questions.iter().map(|q| q.points).collect();
        assert_eq!(points, vec![100, 200, 300, 400, 500]);
        assert!(cat.name.is_empty());
        assert!(cat.questions.iter().all(|q| !q.revealed && !q.is_daily));
    }
}
