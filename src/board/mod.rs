//! Board topology: the shared loop, entry offsets, home stretches and safe cells.
//!
//! Everything here is static data plus pure lookups. Positions stored on
//! pieces are colour-relative offsets; this module turns them into absolute
//! grid coordinates so pieces of different colours can be compared.

pub mod topology;

pub use topology::{
    entry_cells, entry_index, global_cell, home_cell, home_stretch, is_safe_cell, loop_index,
    occupancy, track_cell, CellOccupants, Coordinate, BOARD_SIZE, HOME_STRETCH_LENGTH,
    LOOP_LENGTH, MAIN_LOOP, SAFE_CELLS,
};
