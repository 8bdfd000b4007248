//! Pieces and their position encoding.
//!
//! ## Position Encoding
//!
//! | State      | `position`                                              |
//! |------------|---------------------------------------------------------|
//! | `InBase`   | [`BASE_POSITION`] (-1)                                  |
//! | `OnTrack`  | `0..=50` main loop offset, `51..=56` home stretch offset |
//! | `Finished` | [`FINISH_POSITION`] (56)                                |
//!
//! Offsets are relative to the owning colour's entry cell. State and position
//! are only changed through [`Piece`] methods, which keep them consistent.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::InvariantViolation;

/// Number of pieces each colour owns for the whole game.
pub const PIECES_PER_COLOR: usize = 4;

/// Sentinel position of a piece waiting in its base.
pub const BASE_POSITION: i8 = -1;

/// Last main loop offset before a piece turns into its home stretch.
pub const LAST_LOOP_OFFSET: i8 = 50;

/// First home stretch offset.
pub const HOME_STRETCH_START: i8 = 51;

/// Final home stretch cell. Landing here exactly finishes the piece.
pub const FINISH_POSITION: i8 = 56;

/// Die face that releases a piece from base and grants a bonus turn.
pub const MAX_DIE_FACE: u8 = 6;

/// Piece identifier, unique within its colour (1..=4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Iterate over the IDs every colour starts with.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (1..=PIECES_PER_COLOR as u8).map(PieceId)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A piece named by owner and ID. This is the piece-selection input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceRef {
    pub color: Color,
    pub id: PieceId,
}

impl PieceRef {
    #[must_use]
    pub const fn new(color: Color, id: PieceId) -> Self {
        Self { color, id }
    }
}

impl std::fmt::Display for PieceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} piece {}", self.color, self.id)
    }
}

/// Lifecycle state of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceState {
    /// Not yet entered play.
    InBase,
    /// On the main loop or in the home stretch.
    OnTrack,
    /// Reached the centre. Permanent.
    Finished,
}

/// A single piece.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    color: Color,
    state: PieceState,
    position: i8,
}

impl Piece {
    /// Create a piece waiting in base.
    #[must_use]
    pub const fn new(color: Color, id: PieceId) -> Self {
        Self {
            id,
            color,
            state: PieceState::InBase,
            position: BASE_POSITION,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn state(&self) -> PieceState {
        self.state
    }

    /// Raw encoded position (see module docs).
    #[must_use]
    pub const fn position(&self) -> i8 {
        self.position
    }

    #[must_use]
    pub const fn piece_ref(&self) -> PieceRef {
        PieceRef::new(self.color, self.id)
    }

    #[must_use]
    pub fn is_in_base(&self) -> bool {
        self.state == PieceState::InBase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == PieceState::Finished
    }

    /// Main loop offset, if the piece is on the shared loop (not in base,
    /// not in its home stretch).
    #[must_use]
    pub fn loop_offset(&self) -> Option<u8> {
        match self.state {
            PieceState::OnTrack if self.position <= LAST_LOOP_OFFSET => Some(self.position as u8),
            _ => None,
        }
    }

    /// Home stretch offset (0..=5), if the piece is in its home stretch.
    /// A finished piece sits on the last home stretch cell.
    #[must_use]
    pub fn home_offset(&self) -> Option<u8> {
        if self.state != PieceState::InBase && self.position >= HOME_STRETCH_START {
            Some((self.position - HOME_STRETCH_START) as u8)
        } else {
            None
        }
    }

    /// Total steps travelled from the entry cell.
    ///
    /// Derived from the position; `None` while the piece is in base.
    #[must_use]
    pub fn travel_distance(&self) -> Option<u8> {
        match self.state {
            PieceState::InBase => None,
            PieceState::OnTrack | PieceState::Finished => Some(self.position as u8),
        }
    }

    // === Transitions ===

    /// Put a based piece on its entry cell.
    pub(crate) fn enter(&mut self) {
        debug_assert!(self.is_in_base(), "{} entered from {:?}", self.piece_ref(), self.state);
        self.state = PieceState::OnTrack;
        self.position = 0;
    }

    /// Move an on-track piece to `position`, finishing it on 56.
    pub(crate) fn advance_to(&mut self, position: i8) {
        debug_assert!(
            self.state == PieceState::OnTrack && position > self.position && position <= FINISH_POSITION,
            "{} cannot advance from {} to {}",
            self.piece_ref(),
            self.position,
            position
        );
        self.position = position;
        self.state = if position == FINISH_POSITION {
            PieceState::Finished
        } else {
            PieceState::OnTrack
        };
    }

    /// Return a captured piece to its base.
    pub(crate) fn send_to_base(&mut self) {
        debug_assert!(
            self.loop_offset().is_some(),
            "{} captured outside the main loop",
            self.piece_ref()
        );
        self.state = PieceState::InBase;
        self.position = BASE_POSITION;
    }

    /// Check the state/position encoding.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let consistent = match self.state {
            PieceState::InBase => self.position == BASE_POSITION,
            PieceState::OnTrack => (0..FINISH_POSITION).contains(&self.position),
            PieceState::Finished => self.position == FINISH_POSITION,
        };

        if consistent {
            Ok(())
        } else {
            Err(InvariantViolation::PositionMismatch {
                piece: self.piece_ref(),
                state: self.state,
                position: self.position,
            })
        }
    }

    /// Build a piece at an encoded position, deriving its state.
    ///
    /// `-1` is base, `56` is finished, anything in between is on track.
    pub fn at(color: Color, id: PieceId, position: i8) -> Result<Self, InvariantViolation> {
        let state = match position {
            BASE_POSITION => PieceState::InBase,
            FINISH_POSITION => PieceState::Finished,
            _ => PieceState::OnTrack,
        };
        let piece = Self {
            id,
            color,
            state,
            position,
        };
        piece.check_invariants()?;
        Ok(piece)
    }
}
