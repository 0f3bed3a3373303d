//! Error types for the tower engine
//!
//! Illegal moves are not errors: `is_valid_move` and `make_move` report them
//! as `Ok(false)`. The variants here cover malformed input and caller bugs.

use std::path::PathBuf;

use thiserror::Error;

use crate::board::{MAX_RANK, MIN_RANK};

/// Errors that can occur while building or querying a board
#[derive(Error, Debug)]
pub enum TowerError {
    /// Unit rank outside the playable range
    #[error("Invalid rank {rank} (must be {}-{})", MIN_RANK, MAX_RANK)]
    InvalidRank { rank: u8 },

    /// Column index outside the board
    #[error("Column {column} out of range (board has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// Move height is zero or taller than the source column
    #[error("Height {height} out of range for column {column} of height {available}")]
    HeightOutOfRange {
        column: usize,
        height: usize,
        available: usize,
    },

    /// Tried to take more units than a run holds
    #[error("Cannot take {requested} units from a run of height {available}")]
    Capacity { requested: usize, available: usize },

    /// Malformed entry in a layout file
    #[error("Layout error at line {line}, column {column}: {reason}")]
    Layout {
        line: usize,
        column: usize,
        reason: String,
    },

    /// Layout file could not be read
    #[error("Failed to read layout {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for tower engine operations
pub type Result<T> = std::result::Result<T, TowerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TowerError::InvalidRank { rank: 9 };
        assert_eq!(err.to_string(), "Invalid rank 9 (must be 1-7)");

        let err = TowerError::Capacity {
            requested: 4,
            available: 2,
        };
        assert_eq!(err.to_string(), "Cannot take 4 units from a run of height 2");

        let err = TowerError::Layout {
            line: 3,
            column: 2,
            reason: "unknown color 'X'".to_string(),
        };
        assert!(err.to_string().contains("line 3, column 2"));
    }
}
