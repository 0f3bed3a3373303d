//! Board structure: a fixed row of columns

use super::{Move, Run, Unit, COLUMNS};
use crate::error::{Result, TowerError};
use crate::eval::evaluate;
use crate::rules::{self, PossibleMoves};

/// Multiplier for the FNV-style fold over column hashes
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;
/// Starting value for the FNV-style fold
const FNV_OFFSET: u64 = 0xCBF2_9CE4_8422_2325;

/// Game position: an ordered set of columns.
///
/// Cloning a board deep-copies every column, so speculative moves on a
/// clone never touch the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    columns: Vec<Run>,
}

impl Board {
    /// Empty board with the default number of columns
    pub fn new() -> Self {
        Self::with_columns(COLUMNS)
    }

    /// Empty board with `count` columns
    pub fn with_columns(count: usize) -> Self {
        Self {
            columns: vec![Run::new(); count],
        }
    }

    /// Board built from existing columns
    pub fn from_runs(columns: Vec<Run>) -> Self {
        Self { columns }
    }

    /// Number of columns
    #[inline]
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// All columns, left to right
    #[inline]
    pub fn columns(&self) -> &[Run] {
        &self.columns
    }

    /// Get a column by index
    pub fn column(&self, index: usize) -> Result<&Run> {
        self.columns.get(index).ok_or(TowerError::ColumnOutOfRange {
            column: index,
            columns: self.columns.len(),
        })
    }

    /// Height of a column
    pub fn height(&self, index: usize) -> Result<usize> {
        Ok(self.column(index)?.height())
    }

    /// Place a unit on top of a column (used while loading a layout)
    pub fn push_unit(&mut self, column: usize, unit: Unit) -> Result<()> {
        self.column_mut(column)?.push(unit);
        Ok(())
    }

    /// Total units on the board
    pub fn unit_count(&self) -> usize {
        self.columns.iter().map(Run::height).sum()
    }

    /// Check whether a move is legal. Bad indices are errors, not `false`.
    #[inline]
    pub fn is_valid_move(&self, mv: Move) -> Result<bool> {
        rules::is_valid_move(self, mv)
    }

    /// Apply a move if legal; returns `Ok(false)` and leaves the board
    /// untouched otherwise.
    #[inline]
    pub fn make_move(&mut self, mv: Move) -> Result<bool> {
        rules::make_move(self, mv)
    }

    /// Lazily enumerate every legal move
    #[inline]
    pub fn possible_moves(&self) -> PossibleMoves<'_> {
        rules::possible_moves(self)
    }

    /// Check the win condition
    #[inline]
    pub fn is_won(&self) -> bool {
        rules::is_won(self)
    }

    /// Heuristic score (higher is closer to a win)
    #[inline]
    pub fn evaluate(&self) -> i64 {
        evaluate(self)
    }

    /// Order-sensitive hash over column contents
    pub fn content_hash(&self) -> u64 {
        self.columns.iter().fold(FNV_OFFSET, |h, run| {
            h.wrapping_mul(FNV_PRIME) ^ run.content_hash()
        })
    }

    pub(crate) fn column_mut(&mut self, index: usize) -> Result<&mut Run> {
        let columns = self.columns.len();
        self.columns
            .get_mut(index)
            .ok_or(TowerError::ColumnOutOfRange {
                column: index,
                columns,
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
