//! Text layout loader
//!
//! A layout lists the board row by row, bottom row first. Entries on a row
//! are separated by commas and map to columns left to right:
//!
//! - `00` leaves the column untouched on this row
//! - otherwise a rank digit followed by a color letter (`M R Y G C I`,
//!   either case), e.g. `7R` or `3c`
//!
//! Units are pushed onto their column in line order, so a column's units
//! end up bottom-to-top as they appear in the file. Blank lines are skipped.
//!
//! # Example
//!
//! ```
//! use tower::layout::parse_layout;
//!
//! let board = parse_layout("7R, 6C\n6R, 00\n", 2).unwrap();
//! assert_eq!(board.height(0).unwrap(), 2);
//! assert_eq!(board.height(1).unwrap(), 1);
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::board::{Board, Color, Unit, COLUMNS};
use crate::error::{Result, TowerError};

/// Entry that leaves a column empty on its row
pub const EMPTY_CELL: &str = "00";

/// Parse layout text into a board with `columns` columns.
pub fn parse_layout(text: &str, columns: usize) -> Result<Board> {
    let mut board = Board::with_columns(columns);

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        for (col, entry) in line.split(',').enumerate() {
            let entry = entry.trim();
            let layout_err = |reason: String| TowerError::Layout {
                line: line_no,
                column: col + 1,
                reason,
            };

            if col >= columns {
                return Err(layout_err(format!(
                    "row has more than {} entries",
                    columns
                )));
            }
            if entry == EMPTY_CELL {
                continue;
            }

            let unit = parse_unit(entry).map_err(layout_err)?;
            board.push_unit(col, unit)?;
        }
    }

    debug!(columns, units = board.unit_count(), "parsed layout");
    Ok(board)
}

/// Read and parse a layout file with the default column count.
pub fn load_layout(path: impl AsRef<Path>) -> Result<Board> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TowerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layout(&text, COLUMNS)
}

/// Decode one two-character entry such as `5G`
fn parse_unit(entry: &str) -> std::result::Result<Unit, String> {
    let mut chars = entry.chars();
    let (Some(digit), Some(letter), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(format!("expected rank digit and color letter, found '{}'", entry));
    };

    let rank = digit
        .to_digit(10)
        .ok_or_else(|| format!("rank '{}' is not a digit", digit))?;
    let color = Color::from_letter(letter).ok_or_else(|| format!("unknown color '{}'", letter))?;

    Unit::new(rank as u8, color).map_err(|e| e.to_string())
}
