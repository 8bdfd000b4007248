//! Move execution: apply a validated move, resolve captures, detect a winner.
//!
//! The executor only touches pieces. Deciding who acts next belongs to the
//! turn controller, which reads the [`MoveOutcome`] returned here.

use serde::{Deserialize, Serialize};

use super::capture::{apply_captures, find_captures, CaptureReport};
use super::movement::{check_move, LegalMove};
use crate::core::{Color, EngineError, GameState, PieceRef, PieceState};

/// Everything a single applied move changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub piece: PieceRef,
    pub roll: u8,
    /// Encoded position before the move (`-1` when entering from base).
    pub from: i8,
    /// Encoded position after the move.
    pub to: i8,
    pub captures: CaptureReport,
    /// Colour that won with this move, if any.
    pub winner: Option<Color>,
}

impl MoveOutcome {
    /// The piece left its base with this move.
    #[must_use]
    pub fn entered(&self) -> bool {
        self.from < 0
    }

    /// The piece reached the centre with this move.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.to == crate::core::FINISH_POSITION
    }

    #[must_use]
    pub fn captured(&self) -> bool {
        self.captures.any()
    }
}

/// Validate and apply `roll` to `piece`.
///
/// On error nothing is changed.
pub fn execute_move(state: &mut GameState, piece: PieceRef, roll: u8) -> Result<MoveOutcome, EngineError> {
    let legal = check_move(state, piece, roll)?;
    Ok(apply_legal_move(state, legal))
}

/// Apply an already validated move.
pub(crate) fn apply_legal_move(state: &mut GameState, legal: LegalMove) -> MoveOutcome {
    let captures = find_captures(state, legal.piece, legal.target);

    if let Some(piece) = state.piece_mut(legal.piece) {
        match legal.target.state {
            PieceState::OnTrack if piece.is_in_base() => piece.enter(),
            _ => piece.advance_to(legal.target.position),
        }
    }
    apply_captures(state, &captures);

    let winner = winner_of(state, legal.piece.color);
    tracing::debug!(
        piece = %legal.piece,
        roll = legal.roll,
        from = legal.from,
        to = legal.target.position,
        captured = captures.captured.len(),
        "piece moved"
    );

    MoveOutcome {
        piece: legal.piece,
        roll: legal.roll,
        from: legal.from,
        to: legal.target.position,
        captures,
        winner,
    }
}

/// `color` if all four of its pieces are finished.
#[must_use]
pub fn winner_of(state: &GameState, color: Color) -> Option<Color> {
    state.player(color).has_won().then_some(color)
}
