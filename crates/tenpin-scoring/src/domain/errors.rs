//! Errors raised by roll intake.

use tenpin_core::error::DomainError;
use thiserror::Error;
use uuid::Uuid;

/// Why a roll was rejected. A rejected roll never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// The pin count is out of range or would overfill the current frame.
    #[error("{0}")]
    InvalidScore(String),

    /// The game has already been fully resolved.
    #[error("the game is over")]
    GameOver,
}

impl ScoringError {
    /// Lifts the error into the workspace-wide `DomainError` for `game_id`.
    #[must_use]
    pub fn into_domain_error(self, game_id: Uuid) -> DomainError {
        match self {
            Self::InvalidScore(reason) => DomainError::InvalidScore(reason),
            Self::GameOver => DomainError::GameOver(game_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_score_maps_to_domain_invalid_score() {
        let err = ScoringError::InvalidScore("too many pins".to_owned());

        match err.into_domain_error(Uuid::new_v4()) {
            DomainError::InvalidScore(msg) => assert_eq!(msg, "too many pins"),
            other => panic!("expected InvalidScore, got {other:?}"),
        }
    }

    #[test]
    fn test_game_over_maps_to_domain_game_over_with_id() {
        let game_id = Uuid::new_v4();

        match ScoringError::GameOver.into_domain_error(game_id) {
            DomainError::GameOver(id) => assert_eq!(id, game_id),
            other => panic!("expected GameOver, got {other:?}"),
        }
    }
}
