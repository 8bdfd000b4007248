//! Movement rules: legality, execution, captures and win detection.
//!
//! - `movement`: which pieces may move for a roll and where they land
//! - `capture`: which opposing pieces a landing sends back to base
//! - `engine`: applies a move and reports what changed
//!
//! None of these decide whose turn is next; see `turn`.

pub mod movement;
pub mod capture;
pub mod engine;

pub use movement::{check_move, has_legal_move, legal_moves, move_target, validate_roll, LegalMove, LegalMoves, MoveTarget};
pub use capture::{find_captures, CaptureReport};
pub use engine::{execute_move, winner_of, MoveOutcome};
