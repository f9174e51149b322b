// src/game/board.rs

use serde::Serialize;

use crate::{models::question::QuestionRecord, utils::text::display_name};

/// A board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Category as written in the CSV.
    pub key: String,
    pub display_name: String,
    /// Question indexes, top to bottom.
    #[serde(skip)]
    pub squares: Vec<usize>,
}

/// Grid layout: one column per category, in the order categories first appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    categories: Vec<Category>,
    /// (column, row) of each question, indexed like the question list.
    positions: Vec<(usize, usize)>,
}

impl Board {
    pub fn new(questions: &[QuestionRecord]) -> Self {
        let mut categories: Vec<Category> = Vec::new();
        let mut positions = Vec::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            let column = match categories.iter().position(|c| c.key == question.category) {
                Some(column) => column,
                None => {
                    categories.push(Category {
                        key: question.category.clone(),
                        display_name: display_name(&question.category),
                        squares: Vec::new(),
                    });
                    categories.len() - 1
                }
            };

            let squares = &mut categories[column].squares;
            positions.push((column, squares.len()));
            squares.push(index);
        }

        Self {
            categories,
            positions,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Tallest column; shorter columns leave disabled cells at the bottom.
    pub fn rows(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.squares.len())
            .max()
            .unwrap_or(0)
    }

    /// `(column, row)` of a question, both 0-based.
    pub fn position(&self, square: usize) -> Option<(usize, usize)> {
        self.positions.get(square).copied()
    }

    /// Question index at a grid cell, or `None` for a disabled cell.
    pub fn square_at(&self, column: usize, row: usize) -> Option<usize> {
        self.categories.get(column)?.squares.get(row).copied()
    }
}
