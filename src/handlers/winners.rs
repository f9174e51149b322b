// src/handlers/winners.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::{Sqlite, SqlitePool};
use validator::Validate;

use crate::{
    error::AppError,
    models::winner::{SaveWinnerRequest, WinnerRecord},
};

const UPSERT_WINNER: &str = r#"
    INSERT INTO winners (category, question, answer, winner_name)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (category, question, answer) DO UPDATE SET
        winner_name = excluded.winner_name,
        updated_at = CURRENT_TIMESTAMP
"#;

/// Inserts or replaces the winner of one square, keyed by `(category, question, answer)`.
pub async fn upsert_winner<'e, E>(executor: E, winner: &SaveWinnerRequest) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(UPSERT_WINNER)
        .bind(&winner.category)
        .bind(&winner.question)
        .bind(&winner.answer)
        .bind(&winner.winner_name)
        .execute(executor)
        .await?;
    Ok(())
}

fn validated(payload: SaveWinnerRequest) -> Result<SaveWinnerRequest, AppError> {
    let payload = payload.normalized();
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    Ok(payload)
}

/// Persists the winner of a square.
///
/// Accepts both `{category, question, answer, winnerName}` and the older
/// `{Category, Question, Answer, EnteredValue}` body.
pub async fn save_winner(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SaveWinnerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let winner = validated(payload)?;

    upsert_winner(&pool, &winner).await.map_err(|e| {
        tracing::error!("Failed to save winner: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!(
        "Saved winner {} for {} / {}",
        winner.winner_name,
        winner.category,
        winner.question
    );

    Ok(Json(json!({ "message": "Winner saved successfully" })))
}

/// Persists several winners at once. Either all rows are written or none.
pub async fn save_winners(
    State(pool): State<SqlitePool>,
    Json(payload): Json<Vec<SaveWinnerRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let winners = payload
        .into_iter()
        .map(validated)
        .collect::<Result<Vec<_>, _>>()?;

    let mut tx = pool.begin().await?;
    for winner in &winners {
        upsert_winner(&mut *tx, winner).await?;
    }
    tx.commit().await?;

    tracing::info!("Saved {} winners", winners.len());

    Ok(Json(json!({
        "message": "Winners updated successfully",
        "count": winners.len()
    })))
}

/// Lists every persisted winner, oldest square first.
pub async fn list_winners(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let winners = sqlx::query_as::<_, WinnerRecord>(
        r#"
        SELECT id, category, question, answer, winner_name, updated_at
        FROM winners
        ORDER BY id ASC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list winners: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(winners))
}
