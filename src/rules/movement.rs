//! Move legality.
//!
//! A move is a die value spent on one piece. Rules, in order:
//! 1. The piece must belong to the active colour.
//! 2. A piece in base needs a 6 and lands on its entry cell (position 0).
//! 3. A finished piece never moves.
//! 4. A piece on track moves `roll` steps if that does not overshoot 56,
//!    finishing exactly on 56.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    Color, EngineError, GameState, Piece, PieceRef, PieceState, FINISH_POSITION, LAST_LOOP_OFFSET,
    MAX_DIE_FACE,
};

/// Where a legal move puts the piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveTarget {
    pub state: PieceState,
    pub position: i8,
}

impl MoveTarget {
    /// Main loop offset of the destination, if it is on the shared loop.
    ///
    /// Only such destinations can capture.
    #[must_use]
    pub fn loop_offset(&self) -> Option<u8> {
        (self.state == PieceState::OnTrack && self.position <= LAST_LOOP_OFFSET)
            .then_some(self.position as u8)
    }
}

/// A validated move for one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalMove {
    pub piece: PieceRef,
    pub roll: u8,
    /// Encoded position before the move.
    pub from: i8,
    pub target: MoveTarget,
}

/// Legal moves for one roll. A colour never has more than four.
pub type LegalMoves = SmallVec<[LegalMove; 4]>;

/// Check that a die value is a face of the die.
pub fn validate_roll(roll: u8) -> Result<u8, EngineError> {
    if (1..=MAX_DIE_FACE).contains(&roll) {
        Ok(roll)
    } else {
        Err(EngineError::InvalidDieValue(roll))
    }
}

/// Destination of `piece` for `roll`, ignoring whose turn it is.
///
/// `None` for a value that is not a die face.
#[must_use]
pub fn move_target(piece: &Piece, roll: u8) -> Option<MoveTarget> {
    validate_roll(roll).ok()?;
    match piece.state() {
        PieceState::InBase if roll == MAX_DIE_FACE => Some(MoveTarget {
            state: PieceState::OnTrack,
            position: 0,
        }),
        PieceState::InBase | PieceState::Finished => None,
        PieceState::OnTrack => {
            let position = piece.position() + roll as i8;
            if position > FINISH_POSITION {
                None
            } else if position == FINISH_POSITION {
                Some(MoveTarget {
                    state: PieceState::Finished,
                    position,
                })
            } else {
                Some(MoveTarget {
                    state: PieceState::OnTrack,
                    position,
                })
            }
        }
    }
}

/// Validate moving `piece` by `roll` for the colour whose turn it is.
///
/// No side effects; the error says why the selection is rejected.
pub fn check_move(state: &GameState, piece: PieceRef, roll: u8) -> Result<LegalMove, EngineError> {
    let roll = validate_roll(roll)?;

    let active = state.active_color();
    if piece.color != active {
        return Err(EngineError::OutOfTurnSelection { piece, active });
    }

    let current = state.piece(piece).ok_or(EngineError::UnknownPiece {
        color: piece.color,
        id: piece.id,
    })?;

    let target = move_target(current, roll).ok_or(EngineError::IllegalMove { piece, roll })?;

    Ok(LegalMove {
        piece,
        roll,
        from: current.position(),
        target,
    })
}

/// Every legal move `color` has for `roll`, in piece order.
#[must_use]
pub fn legal_moves(state: &GameState, color: Color, roll: u8) -> LegalMoves {
    state
        .player(color)
        .pieces()
        .iter()
        .filter_map(|piece| {
            move_target(piece, roll).map(|target| LegalMove {
                piece: piece.piece_ref(),
                roll,
                from: piece.position(),
                target,
            })
        })
        .collect()
}

/// Whether `color` can use `roll` at all. When false the turn auto-passes.
#[must_use]
pub fn has_legal_move(state: &GameState, color: Color, roll: u8) -> bool {
    state
        .player(color)
        .pieces()
        .iter()
        .any(|piece| move_target(piece, roll).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PieceId, BASE_POSITION};

    fn blue(id: u8) -> PieceRef {
        PieceRef::new(Color::Blue, PieceId::new(id))
    }

    #[test]
    fn test_validate_roll() {
        assert_eq!(validate_roll(1), Ok(1));
        assert_eq!(validate_roll(6), Ok(6));
        assert_eq!(validate_roll(0), Err(EngineError::InvalidDieValue(0)));
        assert_eq!(validate_roll(7), Err(EngineError::InvalidDieValue(7)));
    }

    #[test]
    fn test_non_die_values_have_no_moves() {
        let mut state = GameState::new(Color::Blue);
        state.place(blue(1), 10).unwrap();

        for roll in [0, 7, 200] {
            assert_eq!(move_target(state.piece(blue(1)).unwrap(), roll), None);
            assert!(legal_moves(&state, Color::Blue, roll).is_empty());
            assert!(!has_legal_move(&state, Color::Blue, roll));
        }
        assert_eq!(legal_moves(&state, Color::Blue, 6).len(), 1);
    }

    #[test]
    fn test_base_needs_six() {
        let piece = Piece::new(Color::Blue, PieceId::new(1));

        for roll in 1..6 {
            assert_eq!(move_target(&piece, roll), None);
        }
        assert_eq!(
            move_target(&piece, 6),
            Some(MoveTarget {
                state: PieceState::OnTrack,
                position: 0
            })
        );
    }

    #[test]
    fn test_finished_never_moves() {
        let piece = Piece::at(Color::Red, PieceId::new(2), FINISH_POSITION).unwrap();
        for roll in 1..=6 {
            assert_eq!(move_target(&piece, roll), None);
        }
    }

    #[test]
    fn test_track_moves_and_overshoot() {
        let piece = Piece::at(Color::Green, PieceId::new(1), 52).unwrap();

        assert_eq!(move_target(&piece, 3).map(|t| t.position), Some(55));
        assert_eq!(
            move_target(&piece, 4),
            Some(MoveTarget {
                state: PieceState::Finished,
                position: FINISH_POSITION
            })
        );
        assert_eq!(move_target(&piece, 5), None);
    }

    #[test]
    fn test_target_loop_offset() {
        let on_loop = MoveTarget {
            state: PieceState::OnTrack,
            position: 50,
        };
        let in_home = MoveTarget {
            state: PieceState::OnTrack,
            position: 51,
        };
        assert_eq!(on_loop.loop_offset(), Some(50));
        assert_eq!(in_home.loop_offset(), None);
    }

    #[test]
    fn test_check_move_wrong_color() {
        let state = GameState::new(Color::Yellow);

        assert_eq!(
            check_move(&state, blue(1), 6),
            Err(EngineError::OutOfTurnSelection {
                piece: blue(1),
                active: Color::Yellow
            })
        );
    }

    #[test]
    fn test_check_move_unknown_and_illegal() {
        let state = GameState::new(Color::Blue);

        assert!(matches!(
            check_move(&state, blue(7), 6),
            Err(EngineError::UnknownPiece { .. })
        ));
        assert_eq!(
            check_move(&state, blue(1), 3),
            Err(EngineError::IllegalMove {
                piece: blue(1),
                roll: 3
            })
        );

        let legal = check_move(&state, blue(1), 6).unwrap();
        assert_eq!(legal.from, BASE_POSITION);
        assert_eq!(legal.target.position, 0);
    }

    #[test]
    fn test_legal_moves_from_start() {
        let state = GameState::new(Color::Blue);

        assert!(legal_moves(&state, Color::Blue, 4).is_empty());
        assert!(!has_legal_move(&state, Color::Blue, 4));
        assert_eq!(legal_moves(&state, Color::Blue, 6).len(), 4);
        assert!(has_legal_move(&state, Color::Blue, 6));
    }

    #[test]
    fn test_legal_moves_mixed() {
        let mut state = GameState::new(Color::Blue);
        state.place(blue(1), 20).unwrap();
        state.place(blue(2), 54).unwrap();
        state.place(blue(3), FINISH_POSITION).unwrap();

        let moves = legal_moves(&state, Color::Blue, 3);
        let pieces: Vec<_> = moves.iter().map(|m| m.piece).collect();
        assert_eq!(pieces, vec![blue(1)]);
        assert_eq!(moves[0].target.position, 23);
    }
}
