//! Player colours and per-colour data storage.
//!
//! ## Color
//!
//! The four fixed seats of the game. Turn order is clockwise:
//! Blue, Yellow, Green, Red, then back to Blue.
//!
//! ## ColorMap
//!
//! Per-colour storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `Color`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table.
pub const COLOR_COUNT: usize = 4;

/// One of the four player colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Yellow,
    Green,
    Red,
}

impl Color {
    /// All colours in clockwise turn order.
    pub const ALL: [Color; COLOR_COUNT] = [Color::Blue, Color::Yellow, Color::Green, Color::Red];

    /// Slot index of this colour (its place in [`Color::ALL`]).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Blue => 0,
            Color::Yellow => 1,
            Color::Green => 2,
            Color::Red => 3,
        }
    }

    /// The clockwise successor. Rotation never skips a colour.
    ///
    /// ```
    /// use ludo_engine::core::Color;
    ///
    /// assert_eq!(Color::Blue.next(), Color::Yellow);
    /// assert_eq!(Color::Red.next(), Color::Blue);
    /// ```
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % COLOR_COUNT]
    }

    /// The three other colours, in clockwise order starting after `self`.
    pub fn opponents(self) -> impl Iterator<Item = Color> {
        (1..COLOR_COUNT).map(move |step| Self::ALL[(self.index() + step) % COLOR_COUNT])
    }

    /// Display name used in logs and commentary.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Red => "Red",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-colour data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Color, ColorMap};
///
/// let mut scores: ColorMap<u32> = ColorMap::new(|_| 0);
/// scores[Color::Green] += 3;
///
/// assert_eq!(scores[Color::Green], 3);
/// assert_eq!(scores[Color::Red], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; COLOR_COUNT],
}

impl<T> ColorMap<T> {
    /// Create a map by calling `factory` for each colour.
    pub fn new(mut factory: impl FnMut(Color) -> T) -> Self {
        Self {
            data: Color::ALL.map(&mut factory),
        }
    }

    /// Get the value for a colour.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to the value for a colour.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (colour, value) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (colour, mutable value) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Color, &mut T)> {
        Color::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Iterate over values in turn order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Clone> ColorMap<T> {
    /// Create a map with every colour set to the same value.
    pub fn with_value(value: T) -> Self {
        Self::new(|_| value.clone())
    }
}

impl<T: Default> Default for ColorMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}
