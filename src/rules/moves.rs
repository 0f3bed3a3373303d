//! Move legality, execution and enumeration
//!
//! A move takes the top `height` units of one column and places them, in
//! order, on top of another column. It is legal when:
//! - the moved group is consecutive (one color, ranks stepping by one)
//! - the group is the whole consecutive top of the source, not a piece of it
//! - the destination is empty (unless the whole source column would move),
//!   or its top unit has the group's color and a strictly higher rank than
//!   the group's bottom unit

use std::cmp::Ordering;

use crate::board::run::is_consecutive;
use crate::board::{Board, Move};
use crate::error::{Result, TowerError};

/// Check whether `mv` is legal on `board`.
///
/// Returns an error for out-of-range columns or heights; an in-range but
/// illegal move is `Ok(false)`.
pub fn is_valid_move(board: &Board, mv: Move) -> Result<bool> {
    check_bounds(board, mv)?;
    Ok(is_legal(board, mv))
}

/// Apply `mv` if it is legal. The board is untouched when this returns
/// `Ok(false)` or an error.
pub fn make_move(board: &mut Board, mv: Move) -> Result<bool> {
    if !is_valid_move(board, mv)? {
        return Ok(false);
    }
    let group = board.column_mut(mv.src)?.pop_n(mv.height)?;
    board.column_mut(mv.dest)?.push_run(group);
    Ok(true)
}

/// Lazily enumerate every legal move on `board`.
///
/// Sources are visited left to right, then destinations, then heights from
/// one upward. Heights stop at the source's consecutive top, since any
/// taller group fails the consecutiveness test.
pub fn possible_moves(board: &Board) -> PossibleMoves<'_> {
    PossibleMoves {
        board,
        src: 0,
        dest: 0,
        height: 1,
        reach: None,
    }
}

fn check_bounds(board: &Board, mv: Move) -> Result<()> {
    let source = board.column(mv.src)?;
    board.column(mv.dest)?;
    if mv.height == 0 || mv.height > source.height() {
        return Err(TowerError::HeightOutOfRange {
            column: mv.src,
            height: mv.height,
            available: source.height(),
        });
    }
    Ok(())
}

/// Legality test for a move already known to be in bounds
fn is_legal(board: &Board, mv: Move) -> bool {
    if mv.src == mv.dest {
        return false;
    }
    let columns = board.columns();
    let source = &columns[mv.src];
    let dest = &columns[mv.dest];

    let Ok(group) = source.top_slice(mv.height) else {
        return false;
    };
    if !is_consecutive(group) {
        return false;
    }

    // Never split a consecutive group: the unit below must not extend it
    if source.height() > mv.height {
        if let Ok(extended) = source.top_slice(mv.height + 1) {
            if is_consecutive(extended) {
                return false;
            }
        }
    }

    let bottom = group[0];
    match dest.top() {
        // Moving a whole column onto an empty one changes nothing useful
        None => mv.height != source.height(),
        Some(dest_top) => bottom.compare(dest_top) == Some(Ordering::Less),
    }
}

/// Iterator over the legal moves of a board.
///
/// Borrowing the board keeps it frozen while moves are produced; call
/// [`Board::possible_moves`] again to restart.
#[derive(Debug, Clone)]
pub struct PossibleMoves<'a> {
    board: &'a Board,
    src: usize,
    dest: usize,
    height: usize,
    /// Consecutive top length of the current source
    reach: Option<usize>,
}

impl PossibleMoves<'_> {
    fn next_source(&mut self) {
        self.src += 1;
        self.dest = 0;
        self.height = 1;
        self.reach = None;
    }

    fn next_dest(&mut self) {
        self.dest += 1;
        self.height = 1;
    }
}

impl Iterator for PossibleMoves<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        let board = self.board;
        let columns = board.columns();
        loop {
            let source = columns.get(self.src)?;
            let reach = *self.reach.get_or_insert_with(|| source.consecutive_prefix());

            if reach == 0 || self.dest >= columns.len() {
                self.next_source();
                continue;
            }
            if self.dest == self.src || self.height > reach {
                self.next_dest();
                continue;
            }

            let mv = Move::new(self.src, self.dest, self.height);
            self.height += 1;
            if is_legal(board, mv) {
                return Some(mv);
            }
        }
    }
}
