// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    handlers::{game, leaderboard, winners},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Game routes drive the board and the in-memory leaderboard.
/// * Winner routes persist results to the database.
/// * Everything else is served from the static front-end directory.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = [
        format!("http://localhost:{}", state.config.port),
        format!("http://127.0.0.1:{}", state.config.port),
    ]
    .iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let game_routes = Router::new()
        .route("/board", get(game::get_board))
        .route("/session", post(game::start_game))
        .route("/squares/{id}/open", post(game::open_square))
        .route("/squares/{id}/confirm", post(game::confirm_square))
        .route("/squares/{id}/winner", post(game::submit_winner))
        .route(
            "/leaderboard",
            get(leaderboard::get_leaderboard).delete(leaderboard::reset_leaderboard),
        )
        .route(
            "/leaderboard/export",
            get(leaderboard::download_export).post(leaderboard::save_export),
        )
        .route("/winners", get(winners::list_winners));

    // Paths used by the original front-end scripts.
    let legacy_routes = Router::new()
        .route("/saveWinner", post(winners::save_winner))
        .route("/update-winner", post(winners::save_winner))
        .route("/save-winners", post(winners::save_winners));

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", game_routes)
        .merge(legacy_routes)
        .fallback_service(static_files)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
