// src/handlers/leaderboard.rs

use std::path::PathBuf;

use axum::{Json, extract::State, http::header, response::IntoResponse};
use chrono::Local;
use serde_json::json;

use crate::{
    config::Config,
    error::AppError,
    state::SharedSession,
    utils::export::{export_file_name, render_leaderboard},
};

/// Current ranking of the game on the board.
pub async fn get_leaderboard(
    State(session): State<SharedSession>,
) -> Result<impl IntoResponse, AppError> {
    let rows = session.lock()?.ranked_totals();
    Ok(Json(rows))
}

/// Clears the scores without touching the board.
pub async fn reset_leaderboard(
    State(session): State<SharedSession>,
) -> Result<impl IntoResponse, AppError> {
    session.lock()?.reset_scores();
    tracing::info!("Leaderboard reset");
    Ok(Json(json!({ "message": "Leaderboard reset" })))
}

/// Builds the export text and its dated file name.
fn render_export(config: &Config, session: &SharedSession) -> Result<(String, String), AppError> {
    let (rows, mode) = {
        let game = session.lock()?;
        (game.ranked_totals(), game.policy().mode)
    };

    let file_name = export_file_name(&config.event_name, Local::now().date_naive());
    Ok((file_name, render_leaderboard(&rows, mode)))
}

/// Downloads the leaderboard as a text file.
pub async fn download_export(
    State(config): State<Config>,
    State(session): State<SharedSession>,
) -> Result<impl IntoResponse, AppError> {
    let (file_name, content) = render_export(&config, &session)?;

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ),
    ];

    Ok((headers, content))
}

/// Writes the leaderboard text file into the export directory.
pub async fn save_export(
    State(config): State<Config>,
    State(session): State<SharedSession>,
) -> Result<impl IntoResponse, AppError> {
    let (file_name, content) = render_export(&config, &session)?;

    let dir = PathBuf::from(&config.export_dir);
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(&file_name);
    tokio::fs::write(&path, content).await.map_err(|e| {
        tracing::error!("Failed to write {}: {:?}", path.display(), e);
        AppError::from(e)
    })?;

    tracing::info!("Leaderboard exported to {}", path.display());

    Ok(Json(json!({
        "file": path.display().to_string(),
        "file_name": file_name,
    })))
}
