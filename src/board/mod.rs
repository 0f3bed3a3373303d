//! Board representation for the tower puzzle

pub mod board;
pub mod run;


use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, TowerError};

// Re-exports
pub use board::Board;
pub use run::Run;

/// Default number of columns
pub const COLUMNS: usize = 8;
/// Lowest unit rank
pub const MIN_RANK: u8 = 1;
/// Highest unit rank
pub const MAX_RANK: u8 = 7;
/// Height of a finished column (one unit of every rank)
pub const TOWER_HEIGHT: usize = (MAX_RANK - MIN_RANK + 1) as usize;

/// Unit colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Magenta,
    Red,
    Yellow,
    Green,
    Cyan,
    Indigo,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Magenta,
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Cyan,
        Color::Indigo,
    ];

    /// Stable ordinal (1-6)
    #[inline]
    pub fn ordinal(self) -> u8 {
        match self {
            Color::Magenta => 1,
            Color::Red => 2,
            Color::Yellow => 3,
            Color::Green => 4,
            Color::Cyan => 5,
            Color::Indigo => 6,
        }
    }

    /// Single-letter code used by layout files
    #[inline]
    pub fn letter(self) -> char {
        match self {
            Color::Magenta => 'M',
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Cyan => 'C',
            Color::Indigo => 'I',
        }
    }

    /// Parse a layout letter (case-insensitive)
    pub fn from_letter(letter: char) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|c| c.letter() == letter.to_ascii_uppercase())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single ranked, colored piece.
///
/// Units of different colors have no order: [`Unit::compare`] returns `None`
/// for them. `Unit` does not implement `PartialOrd` so that `<` can never
/// quietly answer `false` for an incomparable pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    rank: u8,
    color: Color,
}

impl Unit {
    /// Create a unit, rejecting ranks outside `MIN_RANK..=MAX_RANK`
    pub fn new(rank: u8, color: Color) -> Result<Self> {
        if !(MIN_RANK..=MAX_RANK).contains(&rank) {
            return Err(TowerError::InvalidRank { rank });
        }
        Ok(Self { rank, color })
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn color(self) -> Color {
        self.color
    }

    /// Order two units of the same color by rank; `None` across colors.
    #[inline]
    pub fn compare(self, other: Unit) -> Option<Ordering> {
        if self.color == other.color {
            Some(self.rank.cmp(&other.rank))
        } else {
            None
        }
    }

    /// True if `below` may sit directly under `self` in a consecutive run
    #[inline]
    pub fn stacks_on(self, below: Unit) -> bool {
        self.color == below.color && below.rank == self.rank + 1
    }

    /// Injective per-unit hash (color ordinal and rank)
    #[inline]
    pub fn content_hash(self) -> u64 {
        self.color.ordinal() as u64 * 10 + self.rank as u64
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.color.letter())
    }
}

/// A move of the top `height` units of column `src` onto column `dest`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub src: usize,
    pub dest: usize,
    pub height: usize,
}

impl Move {
    #[inline]
    pub fn new(src: usize, dest: usize, height: usize) -> Self {
        Self { src, dest, height }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} -> {}", self.src, self.height, self.dest)
    }
}
