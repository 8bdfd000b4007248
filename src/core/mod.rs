//! Core engine types: colours, pieces, state, actions, dice, configuration, errors.
//!
//! This module contains the data model. The rules that change it live in
//! `rules` and `turn`.

pub mod color;
pub mod piece;
pub mod state;
pub mod action;
pub mod rng;
pub mod config;
pub mod error;

pub use color::{Color, ColorMap, COLOR_COUNT};
pub use piece::{
    Piece, PieceId, PieceRef, PieceState, BASE_POSITION, FINISH_POSITION, HOME_STRETCH_START,
    LAST_LOOP_OFFSET, MAX_DIE_FACE, PIECES_PER_COLOR,
};
pub use state::{GameState, Phase, PieceCounts, Player};
pub use action::{Action, ActionRecord};
pub use rng::Dice;
pub use config::{GameConfig, MAX_DELAY_MS};
pub use error::{CommentaryError, ConfigError, EngineError, InvariantViolation};
