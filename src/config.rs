// src/config.rs

use std::{env, fmt::Display, str::FromStr};

use dotenvy::dotenv;

use crate::game::scoring::{BonusPolicy, ScoringMode, ScoringPolicy};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// File path or http(s) URL of the questions CSV.
    pub questions_source: String,
    pub static_dir: String,
    pub export_dir: String,
    /// Prefix of exported leaderboard file names.
    pub event_name: String,
    pub port: u16,
    pub scoring: ScoringPolicy,
    pub rust_log: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Invalid values fall back to their defaults. The returned messages describe each
    /// fallback; they are meant to be logged once tracing is initialized.
    pub fn from_env() -> (Self, Vec<String>) {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let mode = match lookup("SCORING_MODE") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warnings.push(format!("Invalid SCORING_MODE: {}, using dollars", e));
                ScoringMode::Dollars
            }),
            None => ScoringMode::Dollars,
        };

        let mut load = |key: &str, default: u32| {
            lookup(key)
                .and_then(|raw| parse_or_warn(key, &raw, &mut warnings))
                .unwrap_or(default)
        };
        let normal_value = load("NORMAL_QUESTION_VALUE", 25);
        let bonus_count = load("BONUS_QUESTION_COUNT", 2) as usize;

        let bonus = lookup("BONUS_QUESTION_VALUE")
            .and_then(|raw| parse_or_warn::<u32>("BONUS_QUESTION_VALUE", &raw, &mut warnings))
            .map(|value| BonusPolicy {
                value,
                count: bonus_count,
            });

        let port = lookup("PORT")
            .and_then(|raw| parse_or_warn("PORT", &raw, &mut warnings))
            .unwrap_or(3000);

        let config = Self {
            database_url: text("DATABASE_URL", "sqlite://winners.db?mode=rwc"),
            questions_source: text("QUESTIONS_SOURCE", "assets/questions.csv"),
            static_dir: text("STATIC_DIR", "static"),
            export_dir: text("EXPORT_DIR", "exports"),
            event_name: text("EVENT_NAME", "Trivia Winners"),
            port,
            scoring: ScoringPolicy {
                mode,
                normal_value,
                bonus,
            },
            rust_log: text("RUST_LOG", "info"),
        };

        (config, warnings)
    }
}

fn parse_or_warn<T: FromStr>(key: &str, raw: &str, warnings: &mut Vec<String>) -> Option<T>
where
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| {
            warnings.push(format!("Invalid {} value {:?}: {}, using default", key, raw, e));
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> (Config, Vec<String>) {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let (config, warnings) = config_from(&[]);

        assert!(warnings.is_empty());
        assert_eq!(config.port, 3000);
        assert_eq!(config.scoring, ScoringPolicy::default());
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.questions_source, "assets/questions.csv");
    }

    #[test]
    fn invalid_values_fall_back_and_are_reported() {
        let (config, warnings) = config_from(&[
            ("PORT", "abc"),
            ("SCORING_MODE", "points"),
            ("NORMAL_QUESTION_VALUE", "-5"),
        ]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.scoring.mode, ScoringMode::Dollars);
        assert_eq!(config.scoring.normal_value, 25);
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("PORT")));
        assert!(warnings.iter().any(|w| w.contains("SCORING_MODE")));
    }

    #[test]
    fn bonus_value_enables_bonus_questions() {
        let (config, warnings) = config_from(&[
            ("BONUS_QUESTION_VALUE", "100"),
            ("BONUS_QUESTION_COUNT", "3"),
            ("SCORING_MODE", "Count"),
        ]);

        assert!(warnings.is_empty());
        assert_eq!(config.scoring.mode, ScoringMode::Count);
        assert_eq!(
            config.scoring.bonus,
            Some(BonusPolicy {
                value: 100,
                count: 3
            })
        );
    }
}
