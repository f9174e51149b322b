// src/handlers/game.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    game::{
        reveal::RevealEvent,
        scoring::{BonusPolicy, ScoringMode, ScoringPolicy},
        session::GameSession,
    },
    handlers::winners::upsert_winner,
    loader,
    models::winner::SaveWinnerRequest,
    state::SharedSession,
};

/// Options chosen on the start-game screen. Anything left out keeps the configured value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct StartGameRequest {
    pub mode: Option<ScoringMode>,
    #[validate(range(min = 1, message = "normal_value must be positive"))]
    pub normal_value: Option<u32>,
    /// `false` turns bonus questions off even if they are configured.
    pub enable_bonus: Option<bool>,
    #[validate(range(min = 1, message = "bonus_value must be positive"))]
    pub bonus_value: Option<u32>,
    pub bonus_count: Option<usize>,
}

/// Bonus questions per game when neither the request nor the config says.
const DEFAULT_BONUS_COUNT: usize = 2;

impl StartGameRequest {
    /// Merges the request over `base`.
    ///
    /// `enable_bonus: true` without a `bonus_value`, on a server with no bonus configured,
    /// makes bonus questions worth double the normal value.
    fn apply(&self, base: ScoringPolicy) -> ScoringPolicy {
        let normal_value = self.normal_value.unwrap_or(base.normal_value);
        let count = self
            .bonus_count
            .or(base.bonus.map(|b| b.count))
            .unwrap_or(DEFAULT_BONUS_COUNT);

        let bonus = match (self.enable_bonus, self.bonus_value, base.bonus) {
            (Some(false), _, _) => None,
            (_, Some(value), _) => Some(BonusPolicy { value, count }),
            (_, None, Some(configured)) => Some(BonusPolicy { count, ..configured }),
            (Some(true), None, None) => Some(BonusPolicy {
                value: normal_value.saturating_mul(2),
                count,
            }),
            (None, None, None) => None,
        };

        ScoringPolicy {
            mode: self.mode.unwrap_or(base.mode),
            normal_value,
            bonus,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitWinnerRequest {
    #[serde(default)]
    pub name: String,
}

/// Returns the board layout and the reveal state of every square.
pub async fn get_board(State(session): State<SharedSession>) -> Result<impl IntoResponse, AppError> {
    let view = session.lock()?.view();
    Ok(Json(view))
}

/// Starts a new game: reloads the questions and rebuilds the board with fresh scores.
pub async fn start_game(
    State(config): State<Config>,
    State(session): State<SharedSession>,
    payload: Option<Json<StartGameRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    if let Err(validation_errors) = request.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let policy = request.apply(config.scoring);
    let questions = loader::load_from(&config.questions_source).await;

    let game = GameSession::new(questions, policy, &mut rand::thread_rng());
    let view = game.view();
    session.replace(game)?;

    Ok(Json(json!({
        "policy": policy,
        "board": view,
    })))
}

/// The host clicked a square.
pub async fn open_square(
    State(session): State<SharedSession>,
    Path(id): Path<usize>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = session.lock()?.advance(id, RevealEvent::Open)?;
    Ok(Json(outcome.state))
}

/// The host clicked through the current overlay.
pub async fn confirm_square(
    State(session): State<SharedSession>,
    Path(id): Path<usize>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = session.lock()?.advance(id, RevealEvent::Confirm)?;
    Ok(Json(outcome.state))
}

/// Enters the winner of a square.
///
/// On completion the win is added to the leaderboard and the winner is persisted.
/// A failed write is logged but does not undo the win.
pub async fn submit_winner(
    State(pool): State<SqlitePool>,
    State(session): State<SharedSession>,
    Path(id): Path<usize>,
    Json(req): Json<SubmitWinnerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (outcome, question, leaderboard) = {
        let mut game = session.lock()?;
        let outcome = game.advance(id, RevealEvent::SubmitName(req.name))?;
        let question = game.question(id).cloned();
        (outcome, question, game.ranked_totals())
    };

    let mut saved = false;
    if let (Some(win), Some(question)) = (&outcome.win, question) {
        let record = SaveWinnerRequest {
            category: question.category,
            question: question.prompt,
            answer: question.answer,
            winner_name: win.name.clone(),
        };
        match upsert_winner(&pool, &record).await {
            Ok(()) => saved = true,
            Err(e) => tracing::error!("Error saving winner to the store: {:?}", e),
        }
    }

    Ok(Json(json!({
        "state": outcome.state,
        "win": outcome.win,
        "saved": saved,
        "leaderboard": leaderboard,
    })))
}
