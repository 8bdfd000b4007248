//! # ludo-engine
//!
//! Rules engine for four-player Ludo.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: a [`Session`] (or the caller, with a bare [`GameState`])
//!    owns the game; every change goes through `&mut` methods.
//!
//! 2. **Rejected Inputs Are No-Ops**: an illegal roll or selection returns an
//!    [`EngineError`] and leaves the state exactly as it was.
//!
//! 3. **Closed Types**: colours, piece states and phases are enums. The only
//!    trait object is the commentary collaborator.
//!
//! ## Architecture
//!
//! - **Positions Are Relative**: a piece stores its distance from its own
//!   entry cell. Board coordinates are derived through `board`.
//!
//! - **Persistent History**: the action history is an `im::Vector`, so
//!   snapshots handed to commentary threads clone cheaply.
//!
//! - **Deterministic Dice**: seeded ChaCha8 rolls; the engine itself only
//!   validates the values it is given.
//!
//! ## Modules
//!
//! - `core`: colours, pieces, state, actions, dice, configuration, errors
//! - `board`: the 15x15 board, main loop, home stretches and safe cells
//! - `rules`: move legality, captures, move execution and win detection
//! - `turn`: the turn state machine and the command-queue session
//! - `commentary`: commentator trait, background desk and summaries

pub mod core;
pub mod board;
pub mod rules;
pub mod turn;
pub mod commentary;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap,
    Piece, PieceId, PieceRef, PieceState,
    GameState, Phase, Player, PieceCounts,
    Action, ActionRecord,
    Dice,
    GameConfig,
    EngineError, InvariantViolation, ConfigError, CommentaryError,
};

pub use crate::board::{Coordinate, global_cell, home_cell, is_safe_cell, track_cell, occupancy};

pub use crate::rules::{
    LegalMove, LegalMoves, MoveTarget, CaptureReport, MoveOutcome,
    legal_moves, has_legal_move, check_move, execute_move,
};

pub use crate::turn::{
    BonusReason, NextTurn, Transition,
    apply_action, apply_roll, apply_selection,
    Session,
};

pub use crate::commentary::{
    Commentator, StaticCommentator, NoCommentator, PlainCommentator,
    CommentaryDesk, CommentaryReply, Ticket, BoardSummary, describe_move,
};
