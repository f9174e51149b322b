// src/game/session.rs

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::{
    game::{
        board::{Board, Category},
        leaderboard::Leaderboard,
        reveal::{RevealError, RevealEvent, RevealState},
        scoring::ScoringPolicy,
    },
    models::{leaderboard::LeaderboardRow, question::QuestionRecord, winner::WinnerEntry},
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("square {0} does not exist")]
    UnknownSquare(usize),
    #[error("square {0} is still being revealed")]
    RevealInProgress(usize),
    #[error(transparent)]
    Reveal(#[from] RevealError),
}

/// Result of driving one square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareOutcome {
    pub state: RevealState,
    /// Set when this step completed the square and a win was recorded.
    pub win: Option<WinnerEntry>,
}

/// One game from load to leaderboard export.
#[derive(Debug, Clone)]
pub struct GameSession {
    questions: Vec<QuestionRecord>,
    board: Board,
    reveals: Vec<RevealState>,
    leaderboard: Leaderboard,
    policy: ScoringPolicy,
}

impl GameSession {
    /// Starts a session, flagging bonus questions according to `policy`.
    pub fn new<R: Rng + ?Sized>(
        mut questions: Vec<QuestionRecord>,
        policy: ScoringPolicy,
        rng: &mut R,
    ) -> Self {
        policy.assign_bonuses(&mut questions, rng);

        let board = Board::new(&questions);
        let reveals = vec![RevealState::Idle; questions.len()];

        tracing::info!(
            "New game: {} questions in {} categories, {} bonus",
            questions.len(),
            board.categories().len(),
            questions.iter().filter(|q| q.is_bonus).count()
        );

        Self {
            questions,
            board,
            reveals,
            leaderboard: Leaderboard::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn question(&self, square: usize) -> Option<&QuestionRecord> {
        self.questions.get(square)
    }

    pub fn state(&self, square: usize) -> Option<&RevealState> {
        self.reveals.get(square)
    }

    /// Square currently covering the board with an overlay, if any.
    pub fn active_square(&self) -> Option<usize> {
        self.reveals.iter().position(RevealState::is_overlay)
    }

    /// Drives the reveal sequence of `square`. Completing it records the win.
    pub fn advance(
        &mut self,
        square: usize,
        event: RevealEvent,
    ) -> Result<SquareOutcome, SessionError> {
        let question = self
            .questions
            .get(square)
            .ok_or(SessionError::UnknownSquare(square))?;

        if event == RevealEvent::Open {
            if let Some(active) = self.active_square().filter(|active| *active != square) {
                return Err(SessionError::RevealInProgress(active));
            }
        }

        let next = self.reveals[square].next(event, question.is_bonus)?;

        let win = match &next {
            RevealState::Completed { winner } => {
                let point_value = self.policy.point_value(question);
                self.leaderboard.record_win(winner, point_value);
                tracing::info!("{} won square {} for {}", winner, square, point_value);
                Some(WinnerEntry {
                    name: winner.clone(),
                    point_value,
                })
            }
            _ => None,
        };

        self.reveals[square] = next.clone();
        Ok(SquareOutcome { state: next, win })
    }

    pub fn ranked_totals(&self) -> Vec<LeaderboardRow> {
        self.leaderboard.ranked_totals()
    }

    /// Clears the scores. Board progress is kept.
    pub fn reset_scores(&mut self) {
        self.leaderboard.reset();
    }

    pub fn view(&self) -> BoardView {
        let squares = self
            .questions
            .iter()
            .zip(&self.reveals)
            .enumerate()
            .filter_map(|(id, (question, state))| {
                let (column, row) = self.board.position(id)?;
                Some(SquareView {
                    id,
                    column,
                    row,
                    label: row + 1,
                    category: question.category.clone(),
                    is_bonus: question.is_bonus,
                    prompt: state.shows_prompt().then(|| question.prompt.clone()),
                    answer: state.shows_answer().then(|| question.answer.clone()),
                    state: state.clone(),
                })
            })
            .collect();

        BoardView {
            categories: self.board.categories().to_vec(),
            rows: self.board.rows(),
            active_square: self.active_square(),
            squares,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardView {
    pub categories: Vec<Category>,
    pub rows: usize,
    pub active_square: Option<usize>,
    pub squares: Vec<SquareView>,
}

#[derive(Debug, Serialize)]
pub struct SquareView {
    pub id: usize,
    pub column: usize,
    pub row: usize,
    /// 1-based number shown on the closed square.
    pub label: usize,
    pub category: String,
    pub is_bonus: bool,
    pub prompt: Option<String>,
    pub answer: Option<String>,
    #[serde(flatten)]
    pub state: RevealState,
}
