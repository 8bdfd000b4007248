//! Snapshot digests and action descriptions handed to commentators.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorMap, GameState, PieceCounts, MAX_DIE_FACE};
use crate::rules::MoveOutcome;

/// Per-colour piece counts plus whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub current: Color,
    pub last_roll: Option<u8>,
    pub counts: ColorMap<PieceCounts>,
}

impl BoardSummary {
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        Self {
            current: state.active_color(),
            last_roll: state.last_roll(),
            counts: ColorMap::new(|color| state.player(color).counts()),
        }
    }

    /// Prompt text for a text-generation commentator.
    #[must_use]
    pub fn prompt(&self, action: &str) -> String {
        let mut prompt = String::from(
            "You are an energetic, witty sports commentator for a Ludo game.\nCurrent context:\n",
        );
        let _ = writeln!(prompt, "- Current player: {}", self.current);
        match self.last_roll {
            Some(roll) => {
                let _ = writeln!(prompt, "- Dice roll: {roll}");
            }
            None => prompt.push_str("- Dice roll: none yet\n"),
        }
        let _ = writeln!(prompt, "- Last action: {action}");
        prompt.push_str("- Board status:\n");
        let _ = write!(prompt, "{self}");
        prompt.push_str(
            "Give a very short, one-sentence punchy commentary about this move or the game. Be excited.\n",
        );
        prompt
    }
}

impl std::fmt::Display for BoardSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (color, counts) in self.counts.iter() {
            writeln!(
                f,
                "{color}: {} on board, {} home, {} in base.",
                counts.on_track, counts.finished, counts.in_base
            )?;
        }
        Ok(())
    }
}

/// Short description of a move for the commentator.
///
/// Captures name the colours that were actually captured.
#[must_use]
pub fn describe_move(outcome: &MoveOutcome) -> String {
    let colors = outcome.captures.captured_colors();
    match colors.as_slice() {
        [] if outcome.finished() => "brought a piece home!".to_string(),
        [] if outcome.roll == MAX_DIE_FACE => "rolled a 6!".to_string(),
        [] => "moved forward.".to_string(),
        [only] => format!("captured {only}!"),
        [rest @ .., last] => {
            let names: Vec<&str> = rest.iter().map(|c| c.name()).collect();
            format!("captured {} and {last}!", names.join(", "))
        }
    }
}
