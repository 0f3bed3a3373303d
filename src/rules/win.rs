//! Win condition
//!
//! The puzzle is solved when every column is either empty or a complete
//! tower: one color, ranks `MAX_RANK` at the bottom down to `MIN_RANK` on
//! top, each step exactly one rank.

use crate::board::{Board, Run, MAX_RANK, MIN_RANK, TOWER_HEIGHT};

/// True if `run` is a finished tower
pub fn is_complete_tower(run: &Run) -> bool {
    let units = run.units();
    units.len() == TOWER_HEIGHT
        && run.is_consecutive()
        && units.first().map(|u| u.rank()) == Some(MAX_RANK)
        && units.last().map(|u| u.rank()) == Some(MIN_RANK)
}

/// Check whether every column is empty or a complete tower
pub fn is_won(board: &Board) -> bool {
    board
        .columns()
        .iter()
        .all(|run| run.is_empty() || is_complete_tower(run))
}
