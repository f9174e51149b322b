// src/game/leaderboard.rs

use std::collections::HashMap;

use crate::models::{leaderboard::LeaderboardRow, winner::WinnerEntry};

/// Running tally of wins for one game session.
///
/// Only the ordered list of entries is stored; rankings are recomputed from it on every
/// call, so they are always a pure function of what was recorded.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<WinnerEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a win. Blank names and zero points are ignored and return `false`.
    pub fn record_win(&mut self, name: &str, point_value: u32) -> bool {
        let name = name.trim();
        if name.is_empty() || point_value == 0 {
            tracing::debug!("Ignoring win for {:?} worth {}", name, point_value);
            return false;
        }

        self.entries.push(WinnerEntry {
            name: name.to_string(),
            point_value,
        });
        true
    }

    /// Totals per name, highest first. Ties keep the order in which names first won.
    pub fn ranked_totals(&self) -> Vec<LeaderboardRow> {
        let mut totals: Vec<(&str, u64)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for entry in &self.entries {
            let position = *positions.entry(entry.name.as_str()).or_insert_with(|| {
                totals.push((entry.name.as_str(), 0));
                totals.len() - 1
            });
            totals[position].1 += u64::from(entry.point_value);
        }

        // `sort_by` is stable, which is what keeps first-appearance order for ties.
        totals.sort_by(|a, b| b.1.cmp(&a.1));

        totals
            .into_iter()
            .enumerate()
            .map(|(i, (name, total))| LeaderboardRow {
                rank: i + 1,
                name: name.to_string(),
                total,
            })
            .collect()
    }

    pub fn entries(&self) -> &[WinnerEntry] {
        &self.entries
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
