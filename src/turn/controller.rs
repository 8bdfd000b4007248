//! Turn state machine.
//!
//! ```text
//! AwaitingRoll(c) --roll d, c can move-->   AwaitingMove(c, d)
//! AwaitingRoll(c) --roll d, no move-->      AwaitingRoll(c)        if d == 6
//!                                           AwaitingRoll(next(c))  otherwise
//! AwaitingMove(c, d) --legal piece-->       Terminal(c)            if c won
//!                                           AwaitingRoll(c)        if 6, capture or finish
//!                                           AwaitingRoll(next(c))  otherwise
//! AwaitingMove(c, d) --illegal piece-->     unchanged (rejected)
//! Terminal(w) --anything-->                 unchanged (rejected)
//! ```
//!
//! Every function here either applies one complete transition or returns an
//! error and leaves the state untouched.

use serde::{Deserialize, Serialize};

use crate::core::{Action, Color, EngineError, GameState, PieceRef, Phase, MAX_DIE_FACE};
use crate::rules::engine::{apply_legal_move, MoveOutcome};
use crate::rules::movement::{check_move, has_legal_move, validate_roll};

/// Why a colour keeps the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusReason {
    Capture,
    RolledSix,
    Finished,
}

impl BonusReason {
    /// Bonus earned by a move, if any.
    ///
    /// A move satisfying several conditions still earns a single bonus turn;
    /// the reason reported is the first of capture, six, finish.
    #[must_use]
    pub fn for_move(outcome: &MoveOutcome) -> Option<Self> {
        if outcome.captured() {
            Some(BonusReason::Capture)
        } else if outcome.roll == MAX_DIE_FACE {
            Some(BonusReason::RolledSix)
        } else if outcome.finished() {
            Some(BonusReason::Finished)
        } else {
            None
        }
    }

    /// Short announcement text.
    #[must_use]
    pub fn announcement(self) -> &'static str {
        match self {
            BonusReason::Capture => "Capture Bonus!",
            BonusReason::RolledSix => "Rolled 6!",
            BonusReason::Finished => "Goal Reached!",
        }
    }
}

/// Who acts after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NextTurn {
    /// The same colour rolls again.
    Bonus { color: Color, reason: BonusReason },
    /// Play passes clockwise.
    Pass { from: Color, to: Color },
    /// The game is over.
    GameOver { winner: Color },
}

impl NextTurn {
    /// The colour that rolls next, if the game continues.
    #[must_use]
    pub fn next_color(&self) -> Option<Color> {
        match *self {
            NextTurn::Bonus { color, .. } => Some(color),
            NextTurn::Pass { to, .. } => Some(to),
            NextTurn::GameOver { .. } => None,
        }
    }
}

/// What an accepted input did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// The roll left `color` with pieces to choose from.
    Rolled { color: Color, roll: u8 },
    /// The roll had no legal move; the turn was handed on without a selection.
    NoMove { color: Color, roll: u8, next: NextTurn },
    /// A piece moved.
    Moved { outcome: MoveOutcome, next: NextTurn },
}

impl Transition {
    /// The turn decision, when the transition ended the current move.
    #[must_use]
    pub fn next_turn(&self) -> Option<NextTurn> {
        match self {
            Transition::Rolled { .. } => None,
            Transition::NoMove { next, .. } | Transition::Moved { next, .. } => Some(*next),
        }
    }
}

/// Apply any input.
pub fn apply_action(state: &mut GameState, action: Action) -> Result<Transition, EngineError> {
    match action {
        Action::Roll(roll) => apply_roll(state, roll),
        Action::Move(piece) => apply_selection(state, piece),
    }
}

/// Record a die value for the colour awaiting a roll.
pub fn apply_roll(state: &mut GameState, roll: u8) -> Result<Transition, EngineError> {
    let color = match state.phase() {
        Phase::AwaitingRoll(color) => color,
        Phase::AwaitingMove { color, .. } => {
            return reject(EngineError::NotAwaitingRoll { active: color })
        }
        Phase::Terminal { winner } => return reject(EngineError::InputAfterTerminal { winner }),
    };
    let roll = validate_roll(roll).or_else(reject)?;

    state.set_last_roll(roll);
    state.record_action(color, Action::Roll(roll));

    let transition = if has_legal_move(state, color, roll) {
        state.set_phase(Phase::AwaitingMove { color, roll });
        tracing::debug!(%color, roll, "rolled");
        Transition::Rolled { color, roll }
    } else {
        // A pass behaves like a null move: only the roll itself can earn a bonus.
        let next = if roll == MAX_DIE_FACE {
            NextTurn::Bonus {
                color,
                reason: BonusReason::RolledSix,
            }
        } else {
            NextTurn::Pass {
                from: color,
                to: color.next(),
            }
        };
        tracing::debug!(%color, roll, "rolled with no legal move");
        hand_over(state, next);
        Transition::NoMove { color, roll, next }
    };

    debug_assert_invariants(state);
    Ok(transition)
}

/// Spend the pending roll on `piece`.
pub fn apply_selection(state: &mut GameState, piece: PieceRef) -> Result<Transition, EngineError> {
    let (color, roll) = match state.phase() {
        Phase::AwaitingMove { color, roll } => (color, roll),
        Phase::AwaitingRoll(color) => return reject(EngineError::NotAwaitingMove { active: color }),
        Phase::Terminal { winner } => return reject(EngineError::InputAfterTerminal { winner }),
    };

    let legal = check_move(state, piece, roll).or_else(reject)?;
    state.record_action(color, Action::Move(piece));
    let outcome = apply_legal_move(state, legal);

    let next = match (outcome.winner, BonusReason::for_move(&outcome)) {
        (Some(winner), _) => NextTurn::GameOver { winner },
        (None, Some(reason)) => NextTurn::Bonus { color, reason },
        (None, None) => NextTurn::Pass {
            from: color,
            to: color.next(),
        },
    };
    hand_over(state, next);

    debug_assert_invariants(state);
    Ok(Transition::Moved { outcome, next })
}

/// Move the phase on according to `next`.
fn hand_over(state: &mut GameState, next: NextTurn) {
    match next {
        NextTurn::Bonus { color, reason } => {
            tracing::debug!(%color, ?reason, "bonus turn");
            state.set_phase(Phase::AwaitingRoll(color));
        }
        NextTurn::Pass { from, to } => {
            tracing::debug!(%from, %to, "turn passes");
            state.advance_turn();
            state.set_phase(Phase::AwaitingRoll(to));
        }
        NextTurn::GameOver { winner } => {
            tracing::info!(%winner, "game won");
            state.set_phase(Phase::Terminal { winner });
        }
    }
}

fn reject<T>(err: EngineError) -> Result<T, EngineError> {
    tracing::debug!(%err, "input rejected");
    Err(err)
}

fn debug_assert_invariants(state: &GameState) {
    if let Err(violation) = state.check_invariants() {
        debug_assert!(false, "invariant violated: {violation}");
        tracing::error!(%violation, "invariant violated");
    }
}
