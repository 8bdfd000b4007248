//! Turn flow: the phase state machine and the session that drives it.
//!
//! - `controller`: applies one roll or selection and decides who acts next
//! - `session`: owns a game, queues commands and keeps the display fields

pub mod controller;
pub mod session;

pub use controller::{apply_action, apply_roll, apply_selection, BonusReason, NextTurn, Transition};
pub use session::{Movable, Session};
