// src/utils/export.rs

use chrono::NaiveDate;

use crate::{
    game::scoring::ScoringMode, models::leaderboard::LeaderboardRow,
    utils::text::sanitize_file_component,
};

/// Names are padded with dots up to this many characters.
const NAME_WIDTH: usize = 20;

/// Renders the leaderboard as plain text, one line per row:
/// `01. Alice...............$75` (dollars) or `01. Alice...............3` (count).
pub fn render_leaderboard(rows: &[LeaderboardRow], mode: ScoringMode) -> String {
    rows.iter()
        .map(|row| render_row(row, mode))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row(row: &LeaderboardRow, mode: ScoringMode) -> String {
    let dots = ".".repeat(NAME_WIDTH.saturating_sub(row.name.chars().count()).max(1));
    match mode {
        ScoringMode::Dollars => format!("{:02}. {}{}${}", row.rank, row.name, dots, row.total),
        ScoringMode::Count => format!("{:02}. {}{}{}", row.rank, row.name, dots, row.total),
    }
}

/// `<event name> - MM-DD-YYYY.txt`
pub fn export_file_name(event_name: &str, date: NaiveDate) -> String {
    let mut event = sanitize_file_component(event_name);
    if event.is_empty() {
        event = "Leaderboard".to_string();
    }
    format!("{} - {}.txt", event, date.format("%m-%d-%Y"))
}
