//! Inputs to the engine and their history.
//!
//! There are exactly two kinds of input:
//! - a die roll, produced by an external roller
//! - a piece selection, produced by the acting participant
//!
//! Every input the engine accepts is recorded as an [`ActionRecord`].

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::piece::PieceRef;

/// A single input to the engine.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Action, Color, PieceId, PieceRef};
///
/// let roll = Action::Roll(6);
/// let select = Action::Move(PieceRef::new(Color::Blue, PieceId::new(1)));
///
/// assert!(roll.is_roll());
/// assert_eq!(select.piece(), Some(PieceRef::new(Color::Blue, PieceId::new(1))));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// The die came up with this value.
    Roll(u8),
    /// The acting participant selected this piece.
    Move(PieceRef),
}

impl Action {
    #[must_use]
    pub fn is_roll(&self) -> bool {
        matches!(self, Action::Roll(_))
    }

    /// The selected piece, for move actions.
    #[must_use]
    pub fn piece(&self) -> Option<PieceRef> {
        match self {
            Action::Move(piece) => Some(*piece),
            Action::Roll(_) => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Roll(value) => write!(f, "roll {value}"),
            Action::Move(piece) => write!(f, "move {piece}"),
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The colour that took this action.
    pub color: Color,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(color: Color, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            color,
            action,
            turn,
            sequence,
        }
    }
}
