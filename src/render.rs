//! Plain-text board rendering
//!
//! ```text
//!  1R
//!  2R  6C
//!  3R  7C      5G
//! --------------------------------
//!   0   1   2   3   4   5   6   7
//! ```
//!
//! Rows are printed top row first. Each cell is right-aligned in a fixed
//! width and empty cells are left blank.

use std::fmt::{self, Write};

use crate::board::Board;

/// Width of one rendered column
const CELL: usize = 4;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tallest = self.columns().iter().map(|run| run.height()).max().unwrap_or(0);

        let mut line = String::with_capacity(CELL * self.size());
        for row in (0..tallest).rev() {
            line.clear();
            for run in self.columns() {
                match run.units().get(row) {
                    // A unit always prints as two characters
                    Some(unit) => write!(line, " {} ", unit)?,
                    None => line.push_str("    "),
                }
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        writeln!(f, "{}", "-".repeat(CELL * self.size()))?;
        line.clear();
        for i in 0..self.size() {
            write!(line, "{:>3} ", i)?;
        }
        write!(f, "{}", line.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Color, Run, Unit};

    fn unit(rank: u8, color: Color) -> Unit {
        Unit::new(rank, color).unwrap()
    }

    #[test]
    fn test_render_rows_top_first() {
        let board = Board::from_runs(vec![
            Run::from_units(vec![unit(3, Color::Red), unit(2, Color::Red)]),
            Run::new(),
            Run::from_units(vec![unit(7, Color::Cyan)]),
        ]);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![" 2R", " 3R      7C", "------------", "  0   1   2"]);
    }

    #[test]
    fn test_render_cells_keep_column_width() {
        let mut board = Board::new();
        board.push_unit(0, unit(7, Color::Magenta)).unwrap();
        board.push_unit(7, unit(1, Color::Indigo)).unwrap();
        board.push_unit(7, unit(4, Color::Yellow)).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("{}4Y", " ".repeat(29)));
        assert_eq!(lines[1], format!(" 7M{} 1I", " ".repeat(25)));
        assert_eq!(lines[2].len(), 32);
        assert_eq!(lines[3], "  0   1   2   3   4   5   6   7");
    }

    #[test]
    fn test_render_empty_board() {
        let text = Board::with_columns(2).to_string();
        assert_eq!(text, "--------\n  0   1");
    }

    #[test]
    fn test_render_does_not_change_board() {
        let board = Board::from_runs(vec![Run::from_units(vec![unit(5, Color::Green)])]);
        let before = board.clone();
        let _ = board.to_string();
        assert_eq!(board, before);
    }
}
