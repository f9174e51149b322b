// src/game/reveal.rs

use serde::Serialize;
use thiserror::Error;

/// Where a single board square is in its reveal sequence.
///
/// `Idle -> [BonusSplash] -> ShowingPrompt -> ShowingAnswer -> AwaitingName -> Completed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RevealState {
    Idle,
    /// Bonus announcement shown before the prompt of a bonus question.
    BonusSplash,
    ShowingPrompt,
    ShowingAnswer,
    AwaitingName,
    Completed { winner: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// The square was clicked.
    Open,
    /// The host clicked through the current overlay.
    Confirm,
    SubmitName(String),
}

impl RevealEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Confirm => "confirm",
            Self::SubmitName(_) => "submit_name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevealError {
    #[error("square is already completed")]
    AlreadyCompleted,
    #[error("cannot {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

impl RevealState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::BonusSplash => "bonus_splash",
            Self::ShowingPrompt => "showing_prompt",
            Self::ShowingAnswer => "showing_answer",
            Self::AwaitingName => "awaiting_name",
            Self::Completed { .. } => "completed",
        }
    }

    /// States that cover the board with an overlay; only one square may be in one.
    pub fn is_overlay(&self) -> bool {
        matches!(
            self,
            Self::BonusSplash | Self::ShowingPrompt | Self::ShowingAnswer
        )
    }

    pub fn shows_prompt(&self) -> bool {
        matches!(self, Self::ShowingPrompt)
    }

    pub fn shows_answer(&self) -> bool {
        matches!(
            self,
            Self::ShowingAnswer | Self::AwaitingName | Self::Completed { .. }
        )
    }

    /// Applies `event`. A blank name while awaiting one leaves the state unchanged.
    pub fn next(&self, event: RevealEvent, is_bonus: bool) -> Result<RevealState, RevealError> {
        let next = match (self, &event) {
            (Self::Completed { .. }, _) => return Err(RevealError::AlreadyCompleted),
            (Self::Idle, RevealEvent::Open) if is_bonus => Self::BonusSplash,
            (Self::Idle, RevealEvent::Open) => Self::ShowingPrompt,
            (Self::BonusSplash, RevealEvent::Confirm) => Self::ShowingPrompt,
            (Self::ShowingPrompt, RevealEvent::Confirm) => Self::ShowingAnswer,
            (Self::ShowingAnswer, RevealEvent::Confirm) => Self::AwaitingName,
            (Self::AwaitingName, RevealEvent::SubmitName(name)) => {
                let name = name.trim();
                if name.is_empty() {
                    Self::AwaitingName
                } else {
                    Self::Completed {
                        winner: name.to_string(),
                    }
                }
            }
            _ => {
                return Err(RevealError::InvalidTransition {
                    state: self.name(),
                    event: event.name(),
                });
            }
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: Vec<RevealEvent>, is_bonus: bool) -> Result<RevealState, RevealError> {
        events
            .into_iter()
            .try_fold(RevealState::Idle, |state, event| state.next(event, is_bonus))
    }

    #[test]
    fn regular_square_walks_through_every_step() {
        let state = run(
            vec![
                RevealEvent::Open,
                RevealEvent::Confirm,
                RevealEvent::Confirm,
                RevealEvent::SubmitName(" Alice ".to_string()),
            ],
            false,
        );

        assert_eq!(
            state,
            Ok(RevealState::Completed {
                winner: "Alice".to_string()
            })
        );
    }

    #[test]
    fn bonus_square_shows_splash_first() {
        assert_eq!(
            RevealState::Idle.next(RevealEvent::Open, true),
            Ok(RevealState::BonusSplash)
        );
        assert_eq!(
            run(vec![RevealEvent::Open, RevealEvent::Confirm], true),
            Ok(RevealState::ShowingPrompt)
        );
    }

    #[test]
    fn blank_name_keeps_waiting() {
        assert_eq!(
            RevealState::AwaitingName.next(RevealEvent::SubmitName("  ".to_string()), false),
            Ok(RevealState::AwaitingName)
        );
    }

    #[test]
    fn completed_square_rejects_everything() {
        let done = RevealState::Completed {
            winner: "Bob".to_string(),
        };
        assert_eq!(
            done.next(RevealEvent::Open, false),
            Err(RevealError::AlreadyCompleted)
        );
    }

    #[test]
    fn out_of_order_events_are_rejected() {
        assert_eq!(
            RevealState::Idle.next(RevealEvent::Confirm, false),
            Err(RevealError::InvalidTransition {
                state: "idle",
                event: "confirm"
            })
        );
        assert!(
            RevealState::ShowingPrompt
                .next(RevealEvent::SubmitName("Alice".to_string()), false)
                .is_err()
        );
    }

    #[test]
    fn visibility_follows_state() {
        assert!(RevealState::ShowingPrompt.shows_prompt());
        assert!(!RevealState::ShowingPrompt.shows_answer());
        assert!(RevealState::AwaitingName.shows_answer());
        assert!(RevealState::ShowingAnswer.is_overlay());
        assert!(!RevealState::AwaitingName.is_overlay());
    }
}
