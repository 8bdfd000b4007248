//! Capture resolution.
//!
//! Only a move that ends on the shared loop can capture. Every opposing piece
//! on the shared loop whose absolute cell equals the landing cell is sent back
//! to base, unless the cell is safe. Pieces in a home stretch are never
//! involved, and pieces of the mover's own colour never capture each other.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::movement::MoveTarget;
use crate::board::{global_cell, is_safe_cell, Coordinate};
use crate::core::{Color, GameState, PieceRef};

/// Captures caused by one move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureReport {
    /// Absolute landing cell, when the move ended on the shared loop.
    pub cell: Option<Coordinate>,
    /// Whether that cell is safe.
    pub safe: bool,
    /// Opposing pieces sent back to base.
    pub captured: SmallVec<[PieceRef; 3]>,
}

impl CaptureReport {
    #[must_use]
    pub fn any(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Distinct captured colours, in turn order.
    #[must_use]
    pub fn captured_colors(&self) -> SmallVec<[Color; 3]> {
        let mut colors: SmallVec<[Color; 3]> = self.captured.iter().map(|p| p.color).collect();
        colors.sort();
        colors.dedup();
        colors
    }
}

/// Find the pieces `mover` would capture by landing on `target`. Pure.
#[must_use]
pub fn find_captures(state: &GameState, mover: PieceRef, target: MoveTarget) -> CaptureReport {
    let Some(offset) = target.loop_offset() else {
        return CaptureReport::default();
    };

    let cell = global_cell(mover.color, offset);
    let safe = is_safe_cell(cell);
    let mut report = CaptureReport {
        cell: Some(cell),
        safe,
        captured: SmallVec::new(),
    };
    if safe {
        return report;
    }

    for color in mover.color.opponents() {
        for piece in state.player(color).pieces() {
            let Some(their_offset) = piece.loop_offset() else {
                continue;
            };
            if global_cell(color, their_offset) == cell {
                report.captured.push(piece.piece_ref());
            }
        }
    }

    report
}

/// Send every captured piece in `report` back to base.
pub(crate) fn apply_captures(state: &mut GameState, report: &CaptureReport) {
    for &captured in &report.captured {
        if let Some(piece) = state.piece_mut(captured) {
            piece.send_to_base();
            tracing::debug!(piece = %captured, cell = ?report.cell, "captured");
        }
    }
}
