// src/models/question.rs

use serde::{Deserialize, Serialize};

use crate::loader::csv::CsvRecord;

/// One trivia question on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Grouping key for the board columns. Never empty.
    pub category: String,

    /// The question text, read from the `question` column.
    pub prompt: String,

    /// The correct answer.
    pub answer: String,

    /// Bonus questions award the bonus value instead of the normal one.
    #[serde(default)]
    pub is_bonus: bool,
}

impl QuestionRecord {
    /// Builds a question from a parsed CSV row.
    ///
    /// Returns `None` when the row has no category, since it could not be placed on the board.
    pub fn from_record(record: &CsvRecord) -> Option<Self> {
        let category = record.get("category").trim();
        if category.is_empty() {
            return None;
        }

        Some(Self {
            category: category.to_string(),
            prompt: record.get("question").to_string(),
            answer: record.get("answer").to_string(),
            is_bonus: false,
        })
    }
}
