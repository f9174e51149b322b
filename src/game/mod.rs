// src/game/mod.rs

pub mod board;
pub mod leaderboard;
pub mod reveal;
pub mod scoring;
pub mod session;
