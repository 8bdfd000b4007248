//! Error types.
//!
//! Input errors ([`EngineError`]) are rejections: the state is left untouched
//! and the caller may treat them as no-ops. [`InvariantViolation`] indicates a
//! defect in the engine (or a corrupt externally supplied state) and must
//! never be silently swallowed.

use std::path::PathBuf;

use super::color::Color;
use super::piece::{PieceId, PieceRef, PieceState};

/// Rejected input. The game state is unchanged whenever one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{piece} cannot move {roll}")]
    IllegalMove { piece: PieceRef, roll: u8 },

    #[error("{piece} selected during {active}'s turn")]
    OutOfTurnSelection { piece: PieceRef, active: Color },

    #[error("game is over, {winner} already won")]
    InputAfterTerminal { winner: Color },

    #[error("{active} must select a piece before rolling again")]
    NotAwaitingRoll { active: Color },

    #[error("{active} must roll before selecting a piece")]
    NotAwaitingMove { active: Color },

    #[error("die value {0} is outside 1..=6")]
    InvalidDieValue(u8),

    #[error("{color} has no piece {id}")]
    UnknownPiece { color: Color, id: PieceId },
}

/// Internal consistency failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("{piece} is {state:?} at position {position}")]
    PositionMismatch {
        piece: PieceRef,
        state: PieceState,
        position: i8,
    },

    #[error("{piece} does not exist")]
    MissingPiece { piece: PieceRef },

    #[error("{color} owns {count} pieces")]
    PieceCount { color: Color, count: usize },

    #[error("{piece} is stored under {owner}")]
    WrongOwner { piece: PieceRef, owner: Color },

    #[error("{color} has duplicate piece id {id}")]
    DuplicatePiece { color: Color, id: PieceId },

    #[error("phase names winner {winner} but not all of its pieces are finished")]
    FalseWinner { winner: Color },

    #[error("{winner} has finished every piece but the game is not over")]
    MissedWinner { winner: Color },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Failure reported by a commentary collaborator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommentaryError {
    #[error("commentary service unavailable: {0}")]
    Unavailable(String),

    #[error("commentary service returned an empty response")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::IllegalMove {
            piece: PieceRef::new(Color::Red, PieceId::new(2)),
            roll: 4,
        };
        assert_eq!(err.to_string(), "Red piece 2 cannot move 4");

        let err = EngineError::InputAfterTerminal { winner: Color::Green };
        assert_eq!(err.to_string(), "game is over, Green already won");
    }

    #[test]
    fn test_invariant_violation_display() {
        let err = InvariantViolation::PositionMismatch {
            piece: PieceRef::new(Color::Blue, PieceId::new(1)),
            state: PieceState::Finished,
            position: 40,
        };
        assert_eq!(err.to_string(), "Blue piece 1 is Finished at position 40");
    }

    #[test]
    fn test_commentary_error_display() {
        assert_eq!(
            CommentaryError::Empty.to_string(),
            "commentary service returned an empty response"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("fallback_commentary must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: fallback_commentary must not be empty"
        );
    }
}
