// src/handlers/mod.rs

pub mod game;
pub mod leaderboard;
pub mod winners;
