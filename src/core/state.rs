//! Game state: players, pieces, turn phase and history.
//!
//! ## GameState
//!
//! The single authoritative state of one game:
//! - Four players, each owning exactly four pieces
//! - The turn [`Phase`] (who acts and what input is expected)
//! - The last die value, turn counter and action history
//!
//! Read access is public so renderers and the commentary collaborator can
//! inspect a snapshot. Mutation goes through the rules and turn modules.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::color::{Color, ColorMap};
use super::error::InvariantViolation;
use super::piece::{Piece, PieceId, PieceRef, PieceState, PIECES_PER_COLOR};

/// How many of a player's pieces are in each state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceCounts {
    pub in_base: usize,
    pub on_track: usize,
    pub finished: usize,
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    pieces: Vec<Piece>,
}

impl Player {
    /// Create a player with all four pieces in base.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: PieceId::all().map(|id| Piece::new(color, id)).collect(),
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Get a piece by ID.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id() == id)
    }

    /// True iff every piece has finished.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.pieces.iter().all(Piece::is_finished)
    }

    /// Count pieces per state.
    #[must_use]
    pub fn counts(&self) -> PieceCounts {
        let mut counts = PieceCounts::default();
        for piece in &self.pieces {
            match piece.state() {
                PieceState::InBase => counts.in_base += 1,
                PieceState::OnTrack => counts.on_track += 1,
                PieceState::Finished => counts.finished += 1,
            }
        }
        counts
    }
}

/// Turn phase: who acts next and which input is expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// `color` must roll the die.
    AwaitingRoll(Color),
    /// `color` rolled `roll` and has at least one legal move to choose from.
    AwaitingMove { color: Color, roll: u8 },
    /// The game is over.
    Terminal { winner: Color },
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    players: ColorMap<Player>,

    phase: Phase,

    /// Most recent die value, kept for display after the roll is consumed.
    last_roll: Option<u8>,

    /// Turn number (starts at 1, incremented on every hand-off).
    pub turn_number: u32,

    /// Action sequence within the turn.
    pub action_sequence: u32,

    /// Every accepted input, oldest first.
    pub action_history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a new game with every piece in base and `first` to roll.
    #[must_use]
    pub fn new(first: Color) -> Self {
        Self {
            players: ColorMap::new(Player::new),
            phase: Phase::AwaitingRoll(first),
            last_roll: None,
            turn_number: 1,
            action_sequence: 0,
            action_history: Vector::new(),
        }
    }

    // === Players and Pieces ===

    #[must_use]
    pub fn players(&self) -> &ColorMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color]
    }

    /// Look up a piece.
    #[must_use]
    pub fn piece(&self, piece: PieceRef) -> Option<&Piece> {
        self.players[piece.color].piece(piece.id)
    }

    pub(crate) fn piece_mut(&mut self, piece: PieceRef) -> Option<&mut Piece> {
        self.players[piece.color].piece_mut(piece.id)
    }

    pub(crate) fn player_mut(&mut self, color: Color) -> &mut Player {
        &mut self.players[color]
    }

    /// Iterate over all sixteen pieces in turn order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.players.values().flat_map(|p| p.pieces().iter())
    }

    /// Put a piece at an encoded position (`-1` base, `0..=55` track, `56` finished).
    ///
    /// Intended for setting up positions and restoring external layouts; it
    /// bypasses the movement rules but not the position encoding.
    pub fn place(&mut self, piece: PieceRef, position: i8) -> Result<(), InvariantViolation> {
        let placed = Piece::at(piece.color, piece.id, position)?;
        let slot = self
            .piece_mut(piece)
            .ok_or(InvariantViolation::MissingPiece { piece })?;
        *slot = placed;
        Ok(())
    }

    // === Turn State ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The colour whose turn it is. After the game ends this is the winner.
    #[must_use]
    pub fn active_color(&self) -> Color {
        match self.phase {
            Phase::AwaitingRoll(color) => color,
            Phase::AwaitingMove { color, .. } => color,
            Phase::Terminal { winner } => winner,
        }
    }

    /// The roll waiting to be spent on a move, if any.
    #[must_use]
    pub fn pending_roll(&self) -> Option<u8> {
        match self.phase {
            Phase::AwaitingMove { roll, .. } => Some(roll),
            _ => None,
        }
    }

    /// True while a roll has happened that still needs a piece selection.
    #[must_use]
    pub fn awaiting_move(&self) -> bool {
        matches!(self.phase, Phase::AwaitingMove { .. })
    }

    #[must_use]
    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        match self.phase {
            Phase::Terminal { winner } => Some(winner),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_last_roll(&mut self, roll: u8) {
        self.last_roll = Some(roll);
    }

    /// Advance to the next turn.
    pub(crate) fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    // === Action History ===

    /// Record an accepted action for the acting colour.
    pub(crate) fn record_action(&mut self, color: Color, action: super::action::Action) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.action_history
            .push_back(ActionRecord::new(color, action, self.turn_number, sequence));
    }

    // === Invariants ===

    /// Verify piece encoding, ownership, piece counts and the winner phase.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (color, player) in self.players.iter() {
            if player.pieces().len() != PIECES_PER_COLOR {
                return Err(InvariantViolation::PieceCount {
                    color,
                    count: player.pieces().len(),
                });
            }

            for (i, piece) in player.pieces().iter().enumerate() {
                if piece.color() != color || player.color() != color {
                    return Err(InvariantViolation::WrongOwner {
                        piece: piece.piece_ref(),
                        owner: color,
                    });
                }
                if player.pieces()[..i].iter().any(|p| p.id() == piece.id()) {
                    return Err(InvariantViolation::DuplicatePiece { color, id: piece.id() });
                }
                piece.check_invariants()?;
            }
        }

        match self.phase {
            Phase::Terminal { winner } if !self.players[winner].has_won() => {
                Err(InvariantViolation::FalseWinner { winner })
            }
            Phase::Terminal { .. } => Ok(()),
            _ => match Color::ALL.into_iter().find(|&c| self.players[c].has_won()) {
                Some(winner) => Err(InvariantViolation::MissedWinner { winner }),
                None => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, BASE_POSITION, FINISH_POSITION};

    fn piece(color: Color, id: u8) -> PieceRef {
        PieceRef::new(color, PieceId::new(id))
    }

    #[test]
    fn test_game_state_new() {
        let state = GameState::new(Color::Blue);

        assert_eq!(state.phase(), Phase::AwaitingRoll(Color::Blue));
        assert_eq!(state.active_color(), Color::Blue);
        assert_eq!(state.last_roll(), None);
        assert!(!state.awaiting_move());
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.pieces().count(), 16);
        assert!(state.pieces().all(Piece::is_in_base));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_player_counts_and_win() {
        let mut state = GameState::new(Color::Red);
        state.place(piece(Color::Green, 1), 10).unwrap();
        state.place(piece(Color::Green, 2), FINISH_POSITION).unwrap();

        let counts = state.player(Color::Green).counts();
        assert_eq!(
            counts,
            PieceCounts {
                in_base: 2,
                on_track: 1,
                finished: 1
            }
        );
        assert!(!state.player(Color::Green).has_won());

        for id in 1..=4 {
            state.place(piece(Color::Green, id), FINISH_POSITION).unwrap();
        }
        assert!(state.player(Color::Green).has_won());
    }

    #[test]
    fn test_phase_accessors() {
        let mut state = GameState::new(Color::Yellow);

        state.set_phase(Phase::AwaitingMove {
            color: Color::Yellow,
            roll: 4,
        });
        assert!(state.awaiting_move());
        assert_eq!(state.pending_roll(), Some(4));
        assert_eq!(state.winner(), None);

        state.set_phase(Phase::Terminal { winner: Color::Red });
        assert!(state.is_terminal());
        assert_eq!(state.active_color(), Color::Red);
        assert_eq!(state.pending_roll(), None);
    }

    #[test]
    fn test_place_rejects_bad_positions() {
        let mut state = GameState::new(Color::Blue);

        assert!(state.place(piece(Color::Blue, 1), 57).is_err());
        assert_eq!(
            state.place(piece(Color::Blue, 9), 3),
            Err(InvariantViolation::MissingPiece {
                piece: piece(Color::Blue, 9)
            })
        );
        assert_eq!(
            state.piece(piece(Color::Blue, 1)).map(Piece::position),
            Some(BASE_POSITION)
        );
    }

    #[test]
    fn test_invariants_catch_missed_and_false_winner() {
        let mut state = GameState::new(Color::Blue);
        for id in 1..=4 {
            state.place(piece(Color::Red, id), FINISH_POSITION).unwrap();
        }
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::MissedWinner { winner: Color::Red })
        );

        state.set_phase(Phase::Terminal { winner: Color::Blue });
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::FalseWinner { winner: Color::Blue })
        );

        state.set_phase(Phase::Terminal { winner: Color::Red });
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_record_action() {
        let mut state = GameState::new(Color::Blue);
        state.record_action(Color::Blue, Action::Roll(3));
        state.advance_turn();
        state.record_action(Color::Yellow, Action::Roll(6));
        state.record_action(Color::Yellow, Action::Move(piece(Color::Yellow, 2)));

        assert_eq!(state.action_history.len(), 3);
        let last = state.action_history.back().unwrap();
        assert_eq!(last.turn, 2);
        assert_eq!(last.sequence, 1);
        assert_eq!(last.color, Color::Yellow);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut state = GameState::new(Color::Green);
        state.place(piece(Color::Blue, 3), 42).unwrap();
        state.set_last_roll(5);
        state.record_action(Color::Green, Action::Roll(5));

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, restored);
        assert!(restored.check_invariants().is_ok());
    }
}
