// src/models/leaderboard.rs

use serde::{Deserialize, Serialize};

/// A ranked row of the leaderboard. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-based position after sorting.
    pub rank: usize,
    pub name: String,
    pub total: u64,
}
