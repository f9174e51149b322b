// src/game/scoring.rs

use std::{fmt, str::FromStr};

use rand::{Rng, seq::index};
use serde::{Deserialize, Serialize};

use crate::models::question::QuestionRecord;

/// How leaderboard totals are counted and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Each win is worth the question's dollar value; exports show `$<total>`.
    #[default]
    Dollars,
    /// Each win is worth 1; exports show the plain count.
    Count,
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dollars" => Ok(Self::Dollars),
            "count" => Ok(Self::Count),
            other => Err(format!("unknown scoring mode {:?}", other)),
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dollars => write!(f, "dollars"),
            Self::Count => write!(f, "count"),
        }
    }
}

/// Bonus questions: how many there are per game and what they are worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusPolicy {
    pub value: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub mode: ScoringMode,
    pub normal_value: u32,
    /// `None` disables bonus questions.
    pub bonus: Option<BonusPolicy>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            mode: ScoringMode::Dollars,
            normal_value: 25,
            bonus: None,
        }
    }
}

impl ScoringPolicy {
    /// Points awarded for winning `question`.
    pub fn point_value(&self, question: &QuestionRecord) -> u32 {
        match (self.mode, self.bonus) {
            (ScoringMode::Count, _) => 1,
            (ScoringMode::Dollars, Some(bonus)) if question.is_bonus => bonus.value,
            (ScoringMode::Dollars, _) => self.normal_value,
        }
    }

    /// Flags a random subset of `questions` as bonus questions and clears the flag on the
    /// rest. At most `questions.len()` questions are flagged.
    pub fn assign_bonuses<R: Rng + ?Sized>(&self, questions: &mut [QuestionRecord], rng: &mut R) {
        for question in questions.iter_mut() {
            question.is_bonus = false;
        }

        let Some(bonus) = self.bonus else {
            return;
        };

        let amount = bonus.count.min(questions.len());
        for i in index::sample(rng, questions.len(), amount) {
            questions[i].is_bonus = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn question(is_bonus: bool) -> QuestionRecord {
        QuestionRecord {
            category: "C".to_string(),
            prompt: "Q".to_string(),
            answer: "A".to_string(),
            is_bonus,
        }
    }

    fn bonus_policy(count: usize) -> ScoringPolicy {
        ScoringPolicy {
            mode: ScoringMode::Dollars,
            normal_value: 25,
            bonus: Some(BonusPolicy { value: 50, count }),
        }
    }

    #[test]
    fn bonus_questions_pay_the_bonus_value() {
        let policy = bonus_policy(2);
        assert_eq!(policy.point_value(&question(false)), 25);
        assert_eq!(policy.point_value(&question(true)), 50);
    }

    #[test]
    fn bonus_flag_is_ignored_when_bonus_is_disabled() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.point_value(&question(true)), 25);
    }

    #[test]
    fn count_mode_scores_one_per_win() {
        let policy = ScoringPolicy {
            mode: ScoringMode::Count,
            ..bonus_policy(1)
        };
        assert_eq!(policy.point_value(&question(false)), 1);
        assert_eq!(policy.point_value(&question(true)), 1);
    }

    #[test]
    fn assigns_exactly_the_configured_number_of_bonuses() {
        let mut questions: Vec<_> = (0..10).map(|_| question(false)).collect();
        let mut rng = StdRng::seed_from_u64(7);

        bonus_policy(2).assign_bonuses(&mut questions, &mut rng);

        assert_eq!(questions.iter().filter(|q| q.is_bonus).count(), 2);
    }

    #[test]
    fn bonus_count_is_capped_by_question_count() {
        let mut questions = vec![question(false)];
        let mut rng = StdRng::seed_from_u64(1);

        bonus_policy(5).assign_bonuses(&mut questions, &mut rng);
        assert!(questions[0].is_bonus);

        let mut none: Vec<QuestionRecord> = Vec::new();
        bonus_policy(2).assign_bonuses(&mut none, &mut rng);
        assert!(none.is_empty());
    }

    #[test]
    fn disabled_bonus_clears_existing_flags() {
        let mut questions = vec![question(true), question(true)];
        let mut rng = StdRng::seed_from_u64(3);

        ScoringPolicy::default().assign_bonuses(&mut questions, &mut rng);

        assert!(questions.iter().all(|q| !q.is_bonus));
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("Dollars".parse::<ScoringMode>(), Ok(ScoringMode::Dollars));
        assert_eq!(" count ".parse::<ScoringMode>(), Ok(ScoringMode::Count));
        assert!("points".parse::<ScoringMode>().is_err());
    }
}
