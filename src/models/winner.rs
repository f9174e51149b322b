// src/models/winner.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// One scored answer inside a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinnerEntry {
    /// Trimmed, non-empty. Exact (case-sensitive) match identifies a person.
    pub name: String,
    pub point_value: u32,
}

/// Represents the 'winners' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WinnerRecord {
    pub id: i64,
    pub category: String,
    pub question: String,
    pub answer: String,
    #[serde(rename = "winnerName")]
    pub winner_name: String,
    pub updated_at: String,
}

/// DTO for persisting the winner of a square.
///
/// Also accepts the older `Category` / `Question` / `Answer` / `EnteredValue` field names.
/// Missing fields deserialize as empty strings so validation reports them as 400.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveWinnerRequest {
    #[serde(default, alias = "Category")]
    #[validate(length(min = 1, max = 200, message = "category is required"))]
    pub category: String,
    #[serde(default, alias = "Question")]
    #[validate(length(min = 1, max = 2000, message = "question is required"))]
    pub question: String,
    #[serde(default, alias = "Answer")]
    #[validate(length(min = 1, max = 2000, message = "answer is required"))]
    pub answer: String,
    #[serde(default, rename = "winnerName", alias = "EnteredValue")]
    #[validate(length(min = 1, max = 100, message = "winnerName is required"))]
    pub winner_name: String,
}

impl SaveWinnerRequest {
    /// Trims every field; a whitespace-only field then fails validation.
    pub fn normalized(self) -> Self {
        Self {
            category: self.category.trim().to_string(),
            question: self.question.trim().to_string(),
            answer: self.answer.trim().to_string(),
            winner_name: self.winner_name.trim().to_string(),
        }
    }
}
