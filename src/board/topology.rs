//! Static board layout.
//!
//! The board is a 15x15 grid. All colours share one 52-cell loop, listed
//! once in [`MAIN_LOOP`] starting at Blue's entry cell. Each colour enters the
//! loop at its own index and, after 50 steps, turns into a private 6-cell
//! home stretch leading to the centre.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Color, ColorMap, GameState, PieceRef, PieceState, HOME_STRETCH_START, LAST_LOOP_OFFSET};

/// Width and height of the board grid.
pub const BOARD_SIZE: u8 = 15;

/// Number of cells in the shared loop.
pub const LOOP_LENGTH: usize = 52;

/// Number of cells in each home stretch.
pub const HOME_STRETCH_LENGTH: usize = 6;

/// A cell on the 15x15 grid. `(0, 0)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

const fn c(x: u8, y: u8) -> Coordinate {
    Coordinate::new(x, y)
}

/// The shared loop in travel order, starting on Blue's entry cell.
pub const MAIN_LOOP: [Coordinate; LOOP_LENGTH] = [
    // Blue sector
    c(1, 6), c(2, 6), c(3, 6), c(4, 6), c(5, 6),
    c(6, 5), c(6, 4), c(6, 3), c(6, 2), c(6, 1), c(6, 0),
    c(7, 0), c(8, 0),
    // Yellow sector
    c(8, 1), c(8, 2), c(8, 3), c(8, 4), c(8, 5),
    c(9, 6), c(10, 6), c(11, 6), c(12, 6), c(13, 6), c(14, 6),
    c(14, 7), c(14, 8),
    // Green sector
    c(13, 8), c(12, 8), c(11, 8), c(10, 8), c(9, 8),
    c(8, 9), c(8, 10), c(8, 11), c(8, 12), c(8, 13), c(8, 14),
    c(7, 14), c(6, 14),
    // Red sector
    c(6, 13), c(6, 12), c(6, 11), c(6, 10), c(6, 9),
    c(5, 8), c(4, 8), c(3, 8), c(2, 8), c(1, 8), c(0, 8),
    c(0, 7), c(0, 6),
];

/// Steps from an entry cell to that colour's star cell.
const STAR_DISTANCE: usize = 8;

/// Loop index of a colour's entry cell (its position 0).
#[must_use]
pub const fn entry_index(color: Color) -> usize {
    match color {
        Color::Blue => 0,
        Color::Yellow => 13,
        Color::Green => 26,
        Color::Red => 39,
    }
}

static BLUE_HOME: [Coordinate; HOME_STRETCH_LENGTH] = [c(1, 7), c(2, 7), c(3, 7), c(4, 7), c(5, 7), c(6, 7)];
static YELLOW_HOME: [Coordinate; HOME_STRETCH_LENGTH] = [c(7, 1), c(7, 2), c(7, 3), c(7, 4), c(7, 5), c(7, 6)];
static GREEN_HOME: [Coordinate; HOME_STRETCH_LENGTH] = [c(13, 7), c(12, 7), c(11, 7), c(10, 7), c(9, 7), c(8, 7)];
static RED_HOME: [Coordinate; HOME_STRETCH_LENGTH] = [c(7, 13), c(7, 12), c(7, 11), c(7, 10), c(7, 9), c(7, 8)];

/// Home stretch of a colour, ordered from the loop towards the centre.
#[must_use]
pub fn home_stretch(color: Color) -> &'static [Coordinate; HOME_STRETCH_LENGTH] {
    match color {
        Color::Blue => &BLUE_HOME,
        Color::Yellow => &YELLOW_HOME,
        Color::Green => &GREEN_HOME,
        Color::Red => &RED_HOME,
    }
}

/// Safe cells: every entry cell plus one star cell per colour.
pub const SAFE_CELLS: [Coordinate; 8] = [
    MAIN_LOOP[entry_index(Color::Blue)],
    MAIN_LOOP[entry_index(Color::Yellow)],
    MAIN_LOOP[entry_index(Color::Green)],
    MAIN_LOOP[entry_index(Color::Red)],
    MAIN_LOOP[entry_index(Color::Blue) + STAR_DISTANCE],
    MAIN_LOOP[entry_index(Color::Yellow) + STAR_DISTANCE],
    MAIN_LOOP[entry_index(Color::Green) + STAR_DISTANCE],
    MAIN_LOOP[entry_index(Color::Red) + STAR_DISTANCE],
];

/// Index into [`MAIN_LOOP`] of a colour's piece that has advanced `offset` steps.
#[must_use]
pub fn loop_index(color: Color, offset: u8) -> usize {
    debug_assert!(offset <= LAST_LOOP_OFFSET as u8, "loop offset {offset} out of range");
    (entry_index(color) + offset as usize) % LOOP_LENGTH
}

/// Shared loop coordinate for a colour's piece at main loop `offset` (0..=50).
#[must_use]
pub fn global_cell(color: Color, offset: u8) -> Coordinate {
    MAIN_LOOP[loop_index(color, offset)]
}

/// Home stretch coordinate for `home_offset` (0..=5).
#[must_use]
pub fn home_cell(color: Color, home_offset: u8) -> Coordinate {
    home_stretch(color)[home_offset as usize]
}

/// Whether nobody can be captured on `coordinate`.
#[must_use]
pub fn is_safe_cell(coordinate: Coordinate) -> bool {
    SAFE_CELLS.contains(&coordinate)
}

/// Coordinate of an encoded track position (`0..=56`), or `None` for base.
#[must_use]
pub fn track_cell(color: Color, position: i8) -> Option<Coordinate> {
    match position {
        p if p < 0 => None,
        p if p < HOME_STRETCH_START => Some(global_cell(color, p as u8)),
        p => Some(home_cell(color, (p - HOME_STRETCH_START) as u8)),
    }
}

/// Pieces standing on one cell.
pub type CellOccupants = SmallVec<[PieceRef; 4]>;

/// Map every occupied board cell to the pieces standing on it.
///
/// Pieces in base have no cell and are left out. Renderers use this to draw
/// stacked pieces.
#[must_use]
pub fn occupancy(state: &GameState) -> FxHashMap<Coordinate, CellOccupants> {
    let mut cells: FxHashMap<Coordinate, CellOccupants> = FxHashMap::default();

    for piece in state.pieces() {
        if piece.state() == PieceState::InBase {
            continue;
        }
        if let Some(cell) = track_cell(piece.color(), piece.position()) {
            cells.entry(cell).or_default().push(piece.piece_ref());
        }
    }

    cells
}

/// Entry cells by colour.
#[must_use]
pub fn entry_cells() -> ColorMap<Coordinate> {
    ColorMap::new(|color| MAIN_LOOP[entry_index(color)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PieceId, FINISH_POSITION};

    #[test]
    fn test_main_loop_cells_are_distinct() {
        let mut cells = MAIN_LOOP.to_vec();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), LOOP_LENGTH);
    }

    #[test]
    fn test_main_loop_is_contiguous() {
        for i in 0..LOOP_LENGTH {
            let a = MAIN_LOOP[i];
            let b = MAIN_LOOP[(i + 1) % LOOP_LENGTH];
            let dx = a.x.abs_diff(b.x);
            let dy = a.y.abs_diff(b.y);
            // Straight steps, or a diagonal step around an inner corner.
            assert!(dx <= 1 && dy <= 1, "cells {a} and {b} are not adjacent");
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "loop offset 200 out of range")]
    fn test_loop_index_rejects_large_offset() {
        let _ = loop_index(Color::Blue, 200);
    }

    #[test]
    fn test_entry_cells() {
        assert_eq!(global_cell(Color::Blue, 0), Coordinate::new(1, 6));
        assert_eq!(global_cell(Color::Yellow, 0), Coordinate::new(8, 1));
        assert_eq!(global_cell(Color::Green, 0), Coordinate::new(13, 8));
        assert_eq!(global_cell(Color::Red, 0), Coordinate::new(6, 13));

        for (_, cell) in entry_cells().iter() {
            assert!(is_safe_cell(*cell));
        }
    }

    #[test]
    fn test_global_cell_wraps() {
        // Yellow enters at 13, so offset 45 wraps to loop index 6.
        assert_eq!(loop_index(Color::Yellow, 45), 6);
        assert_eq!(global_cell(Color::Yellow, 45), MAIN_LOOP[6]);
        // Every colour turns off the loop two cells short of its own entry.
        for color in Color::ALL {
            let last = loop_index(color, LAST_LOOP_OFFSET as u8);
            assert_eq!((last + 2) % LOOP_LENGTH, entry_index(color));
        }
    }

    #[test]
    fn test_star_cells() {
        assert!(is_safe_cell(Coordinate::new(6, 2)));
        assert!(is_safe_cell(Coordinate::new(12, 6)));
        assert!(is_safe_cell(Coordinate::new(8, 12)));
        assert!(is_safe_cell(Coordinate::new(2, 8)));
        assert!(!is_safe_cell(Coordinate::new(6, 3)));
        assert!(!is_safe_cell(Coordinate::new(7, 7)));
    }

    #[test]
    fn test_home_cells_lead_to_centre() {
        for color in Color::ALL {
            let last = home_cell(color, (HOME_STRETCH_LENGTH - 1) as u8);
            assert_eq!(last.x.abs_diff(7) + last.y.abs_diff(7), 1);
            for cell in home_stretch(color) {
                assert!(!MAIN_LOOP.contains(cell));
            }
        }
    }

    #[test]
    fn test_track_cell() {
        assert_eq!(track_cell(Color::Green, -1), None);
        assert_eq!(track_cell(Color::Green, 0), Some(Coordinate::new(13, 8)));
        assert_eq!(track_cell(Color::Green, 51), Some(Coordinate::new(13, 7)));
        assert_eq!(track_cell(Color::Green, FINISH_POSITION), Some(Coordinate::new(8, 7)));
    }

    #[test]
    fn test_occupancy_stacks_pieces() {
        let mut state = GameState::new(Color::Blue);
        state.place(PieceRef::new(Color::Blue, PieceId::new(1)), 5).unwrap();
        state.place(PieceRef::new(Color::Blue, PieceId::new(2)), 5).unwrap();
        state.place(PieceRef::new(Color::Red, PieceId::new(1)), 0).unwrap();

        let cells = occupancy(&state);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[&global_cell(Color::Blue, 5)].len(), 2);
        assert_eq!(
            cells[&Coordinate::new(6, 13)].as_slice(),
            &[PieceRef::new(Color::Red, PieceId::new(1))]
        );
    }
}
