//! Commentary collaborator.
//!
//! Commentary is flavour text shown next to the board. It is produced by an
//! external [`Commentator`] (for example a text-generation service) from a
//! state snapshot and a short description of the last action.
//!
//! ## Guarantees
//!
//! - Requests run on a worker thread; game progression never waits for them.
//! - A failed or unavailable commentator yields the configured fallback text.
//! - Replies only ever update a display string. They carry a ticket so a
//!   front end can tell which action they describe, but stale replies are
//!   still harmless.

mod desk;
mod summary;

pub use desk::{CommentaryDesk, CommentaryReply, Ticket};
pub use summary::{describe_move, BoardSummary};

use crate::core::{CommentaryError, GameState};

/// Produces a short display line for a game moment.
pub trait Commentator: Send + Sync {
    /// Comment on `action` given the state right after it.
    fn comment(&self, snapshot: &GameState, action: &str) -> Result<String, CommentaryError>;
}

/// Always says the same thing.
#[derive(Clone, Debug)]
pub struct StaticCommentator {
    text: String,
}

impl StaticCommentator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Commentator for StaticCommentator {
    fn comment(&self, _snapshot: &GameState, _action: &str) -> Result<String, CommentaryError> {
        Ok(self.text.clone())
    }
}

/// Stands in when no commentary service is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCommentator;

impl Commentator for NoCommentator {
    fn comment(&self, _snapshot: &GameState, _action: &str) -> Result<String, CommentaryError> {
        Err(CommentaryError::Unavailable("no commentator configured".to_string()))
    }
}

/// Restates the action for the current colour with its finished count.
/// Useful for terminals without a text-generation service.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainCommentator;

impl Commentator for PlainCommentator {
    fn comment(&self, snapshot: &GameState, action: &str) -> Result<String, CommentaryError> {
        let summary = BoardSummary::of(snapshot);
        Ok(format!(
            "{} {} ({} home)",
            summary.current,
            action,
            summary.counts[summary.current].finished
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_static_commentator() {
        let state = GameState::new(Color::Blue);
        let commentator = StaticCommentator::new("What a move!");
        assert_eq!(commentator.comment(&state, "moved forward.").unwrap(), "What a move!");
    }

    #[test]
    fn test_no_commentator_is_unavailable() {
        let state = GameState::new(Color::Blue);
        assert!(matches!(
            NoCommentator.comment(&state, "moved forward."),
            Err(CommentaryError::Unavailable(_))
        ));
    }

    #[test]
    fn test_plain_commentator() {
        let state = GameState::new(Color::Green);
        assert_eq!(
            PlainCommentator.comment(&state, "rolled a 6!").unwrap(),
            "Green rolled a 6! (0 home)"
        );
    }
}
