//! Game session: the single owner of a running game.
//!
//! A `Session` wraps the authoritative [`GameState`] together with everything
//! a front end needs around it: a die, a FIFO command queue, a bounded game
//! log, the display commentary line and the commentary desk.
//!
//! ## Command queue
//!
//! Inputs are enqueued with [`Session::submit`] (or [`Session::roll_dice`])
//! and applied one at a time by [`Session::process_next`]. Each command is
//! validated against the state at the moment it is processed, so a command
//! queued behind a turn change is rejected rather than applied to a stale
//! phase.
//!
//! ```
//! use ludo_engine::core::{Action, GameConfig};
//! use ludo_engine::turn::Session;
//!
//! let mut session = Session::new(GameConfig::default().with_dice_seed(7)).unwrap();
//! session.submit(Action::Roll(3));
//! session.submit(Action::Roll(3));
//!
//! let results = session.process_all();
//! assert_eq!(results.len(), 2);
//! assert!(results.iter().all(|r| r.is_ok()));
//! assert_eq!(session.log().len(), 2);
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use smallvec::SmallVec;

use super::controller::{apply_action, NextTurn, Transition};
use crate::commentary::{describe_move, Commentator, CommentaryDesk, CommentaryReply, NoCommentator, Ticket};
use crate::core::{Action, ConfigError, Dice, EngineError, GameConfig, GameState, Phase, PieceRef};
use crate::rules::legal_moves;

/// Pieces the active colour may select, at most four.
pub type Movable = SmallVec<[PieceRef; 4]>;

/// Owns one game and everything displayed around it.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    state: GameState,
    dice: Dice,
    queue: VecDeque<Action>,
    log: VecDeque<String>,
    commentary: String,
    desk: CommentaryDesk,
    last_ticket: Option<Ticket>,
}

impl Session {
    /// Start a game with no commentary service; every commentary request
    /// resolves to the configured fallback text.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_commentator(config, Arc::new(NoCommentator))
    }

    pub fn with_commentator(config: GameConfig, commentator: Arc<dyn Commentator>) -> Result<Self, ConfigError> {
        config.validate()?;
        let desk = CommentaryDesk::new(commentator, config.fallback_commentary.clone());
        let mut session = Self {
            state: GameState::new(config.starting_color),
            dice: dice_for(&config),
            queue: VecDeque::new(),
            log: VecDeque::new(),
            commentary: String::new(),
            desk,
            last_ticket: None,
            config,
        };
        session.welcome();
        Ok(session)
    }

    /// Start a new game with the same configuration.
    ///
    /// Queued commands and the log are discarded. Commentary still in flight
    /// for the old game may land afterwards; it only touches display text.
    pub fn reset(&mut self) {
        self.state = GameState::new(self.config.starting_color);
        self.dice = dice_for(&self.config);
        self.queue.clear();
        self.log.clear();
        self.last_ticket = None;
        self.welcome();
        tracing::debug!(starting = %self.config.starting_color, seed = self.dice.seed(), "session reset");
    }

    fn welcome(&mut self) {
        self.commentary = format!(
            "{} {} starts.",
            self.config.welcome_commentary, self.config.starting_color
        );
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    /// Current display commentary.
    #[must_use]
    pub fn commentary(&self) -> &str {
        &self.commentary
    }

    /// Game log, oldest line first.
    pub fn log(&self) -> &VecDeque<String> {
        &self.log
    }

    /// Commands queued but not yet processed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Ticket of the most recent commentary request.
    #[must_use]
    pub fn last_ticket(&self) -> Option<Ticket> {
        self.last_ticket
    }

    /// Whether a roll would be accepted right now.
    ///
    /// False while a piece selection is pending and after the game is won.
    #[must_use]
    pub fn can_roll(&self) -> bool {
        matches!(self.state.phase(), Phase::AwaitingRoll(_))
    }

    /// Pieces selectable for the pending roll. Empty unless a move is awaited.
    #[must_use]
    pub fn movable_pieces(&self) -> Movable {
        match self.state.pending_roll() {
            Some(roll) => legal_moves(&self.state, self.state.active_color(), roll)
                .iter()
                .map(|m| m.piece)
                .collect(),
            None => Movable::new(),
        }
    }

    // === Input ===

    /// Roll the session's die and enqueue the value.
    pub fn roll_dice(&mut self) -> u8 {
        let roll = self.dice.roll();
        self.submit(Action::Roll(roll));
        roll
    }

    /// Enqueue a command. Nothing is applied until it is processed.
    pub fn submit(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    /// Enqueue a piece selection.
    pub fn select(&mut self, piece: PieceRef) {
        self.submit(Action::Move(piece));
    }

    /// Apply the oldest queued command. `None` when the queue is empty.
    pub fn process_next(&mut self) -> Option<Result<Transition, EngineError>> {
        let action = self.queue.pop_front()?;
        let result = apply_action(&mut self.state, action);
        if let Ok(transition) = &result {
            self.report(transition);
        }
        Some(result)
    }

    /// Apply every queued command in order, including rejected ones.
    pub fn process_all(&mut self) -> Vec<Result<Transition, EngineError>> {
        std::iter::from_fn(|| self.process_next()).collect()
    }

    // === Commentary ===

    /// Apply every reply that has arrived. Returns the last one applied.
    pub fn poll_commentary(&mut self) -> Option<CommentaryReply> {
        let mut last = None;
        while let Some(reply) = self.desk.try_recv() {
            self.commentary = reply.text.clone();
            last = Some(reply);
        }
        last
    }

    /// Wait up to `timeout` for the next reply and apply it.
    pub fn wait_commentary(&mut self, timeout: Duration) -> Option<CommentaryReply> {
        let reply = self.desk.recv_timeout(timeout)?;
        self.commentary = reply.text.clone();
        Some(reply)
    }

    /// Commentary requests not yet received.
    #[must_use]
    pub fn commentary_in_flight(&self) -> usize {
        self.desk.in_flight()
    }

    // === Reporting ===

    fn report(&mut self, transition: &Transition) {
        match transition {
            Transition::Rolled { .. } => {}
            Transition::NoMove { color, roll, next } => {
                self.push_log(format!("{color} rolled {roll}: no moves."));
                self.announce(*next);
            }
            Transition::Moved { outcome, next } => {
                let capture = if outcome.captured() { " CAPTURE!" } else { "" };
                self.push_log(format!("{} moved {}.{capture}", outcome.piece.color, outcome.roll));
                self.announce(*next);
                if !matches!(next, NextTurn::GameOver { .. }) {
                    let ticket = self.desk.request(self.state.clone(), describe_move(outcome));
                    self.last_ticket = Some(ticket);
                }
            }
        }
    }

    fn announce(&mut self, next: NextTurn) {
        self.commentary = match next {
            NextTurn::Bonus { color, reason } => format!("{} Roll again, {color}!", reason.announcement()),
            NextTurn::Pass { to, .. } => format!("{to}'s turn!"),
            NextTurn::GameOver { winner } => {
                let line = format!("{winner} wins!");
                self.push_log(line.clone());
                line
            }
        };
    }

    fn push_log(&mut self, line: String) {
        self.log.push_back(line);
        while self.log.len() > self.config.max_log_entries {
            self.log.pop_front();
        }
    }
}

fn dice_for(config: &GameConfig) -> Dice {
    match config.dice_seed {
        Some(seed) => Dice::new(seed),
        None => Dice::from_entropy(),
    }
}
