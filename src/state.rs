use std::sync::{Arc, Mutex, MutexGuard};

use crate::{config::Config, error::AppError, game::session::GameSession};
use axum::extract::FromRef;
use sqlx::SqlitePool;

/// The game currently on the board. Locked briefly per request, never across an `.await`.
#[derive(Clone)]
pub struct SharedSession(Arc<Mutex<GameSession>>);

impl SharedSession {
    pub fn new(session: GameSession) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, GameSession>, AppError> {
        self.0
            .lock()
            .map_err(|_| AppError::InternalServerError("game session lock poisoned".to_string()))
    }

    /// Swaps in a fresh game.
    pub fn replace(&self, session: GameSession) -> Result<(), AppError> {
        *self.lock()? = session;
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub session: SharedSession,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SharedSession {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}
