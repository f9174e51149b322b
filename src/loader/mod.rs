// src/loader/mod.rs

//! Question loading. Every entry point here is fail-open: problems are logged and the
//! caller gets fewer (possibly zero) questions, never an error.

pub mod csv;
pub mod source;

use crate::models::question::QuestionRecord;

pub use source::{FileSource, HttpSource, LoadError, QuestionSource, source_for};

/// Fetches the source and parses it into questions. Returns an empty list on failure.
pub async fn load(source: &dyn QuestionSource) -> Vec<QuestionRecord> {
    match source.fetch_text().await {
        Ok(text) => {
            let questions = parse_questions(&text);
            tracing::info!(
                "Loaded {} questions from {}",
                questions.len(),
                source.describe()
            );
            questions
        }
        Err(e) => {
            tracing::error!("Error loading questions from {}: {}", source.describe(), e);
            Vec::new()
        }
    }
}

/// Resolves `location` with [`source_for`] and loads it.
pub async fn load_from(location: &str) -> Vec<QuestionRecord> {
    match source_for(location) {
        Ok(source) => load(source.as_ref()).await,
        Err(e) => {
            tracing::error!("Error loading questions: {}", e);
            Vec::new()
        }
    }
}

/// Parses CSV text into questions, dropping rows without a category.
pub fn parse_questions(text: &str) -> Vec<QuestionRecord> {
    csv::parse(text)
        .iter()
        .filter_map(|record| {
            let question = QuestionRecord::from_record(record);
            if question.is_none() {
                tracing::warn!("Skipping row without a category: {:?}", record);
            }
            question
        })
        .collect()
}
