//! Bounded maximizing search
//!
//! There is no opponent, so every level of the tree picks the best child:
//! the value of a position is its static evaluation at depth zero or when
//! won, and otherwise the maximum value over all positions one legal move
//! away. A position with no legal moves is valued by its own evaluation.
//!
//! The only pruning is the dominance cut: once a child reaches
//! [`EvalScore::WIN`] no sibling can beat it, so the remaining siblings are
//! skipped.
//!
//! # Example
//!
//! ```
//! use tower::board::{Board, Color, Run, Unit};
//! use tower::search::Searcher;
//!
//! let red = |r| Unit::new(r, Color::Red).unwrap();
//! let board = Board::from_runs(vec![
//!     Run::from_units(vec![red(7), red(6), red(5), red(4), red(3), red(1)]),
//!     Run::from_units(vec![red(2)]),
//! ]);
//!
//! let mut searcher = Searcher::new(1);
//! let result = searcher.search(&board, 2);
//! assert!(result.best_move.is_some());
//! ```

use crate::board::{Board, Move};
use crate::eval::EvalScore;

use super::tt::{TTStats, TranspositionTable};

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Positions visited
    pub nodes: u64,
    /// Positions valued by static evaluation
    pub leaves: u64,
    /// Cache lookups
    pub tt_probes: u64,
    /// Cache lookups that returned a value
    pub tt_hits: u64,
    /// Sibling loops stopped early by a winning child
    pub win_cutoffs: u64,
}

impl SearchStats {
    /// Cache hit rate in percent
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }

    /// Merge another stats into this one (for combining worker stats)
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
        self.tt_probes += other.tt_probes;
        self.tt_hits += other.tt_hits;
        self.win_cutoffs += other.win_cutoffs;
    }
}

/// Result of a root search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any legal move exists
    pub best_move: Option<Move>,
    /// Value of the position after the best move (or of the root itself
    /// when there is no legal move)
    pub score: i64,
    /// Positions visited
    pub nodes: u64,
}

/// Maximizing searcher with an optional transposition table.
///
/// A searcher owns mutable caches, so concurrent searches each need their
/// own instance.
pub struct Searcher {
    tt: Option<TranspositionTable>,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher with a transposition table of `tt_size_mb` MB.
    #[must_use]
    pub fn new(tt_size_mb: usize) -> Self {
        Self {
            tt: Some(TranspositionTable::new(tt_size_mb)),
            stats: SearchStats::default(),
        }
    }

    /// Create a searcher that re-searches every position.
    #[must_use]
    pub fn without_cache() -> Self {
        Self {
            tt: None,
            stats: SearchStats::default(),
        }
    }

    /// Value of `board` looking `depth` moves ahead.
    pub fn maximize(&mut self, board: &Board, depth: u8) -> i64 {
        self.stats.nodes += 1;

        if depth == 0 || board.is_won() {
            self.stats.leaves += 1;
            return board.evaluate();
        }

        let hash = board.content_hash();
        if let Some(tt) = &self.tt {
            self.stats.tt_probes += 1;
            if let Some(score) = tt.probe(hash, depth) {
                self.stats.tt_hits += 1;
                return score;
            }
        }

        let mut best: Option<i64> = None;
        for mv in board.possible_moves() {
            let mut child = board.clone();
            if !matches!(child.make_move(mv), Ok(true)) {
                continue;
            }
            let score = self.maximize(&child, depth - 1);
            if best.map_or(true, |b| score > b) {
                best = Some(score);
            }
            if score >= EvalScore::WIN {
                self.stats.win_cutoffs += 1;
                break;
            }
        }

        let score = match best {
            Some(score) => score,
            None => {
                self.stats.leaves += 1;
                board.evaluate()
            }
        };

        if let Some(tt) = &mut self.tt {
            tt.store(hash, depth, score);
        }
        score
    }

    /// Value each of `moves` by applying it to a copy of `board` and
    /// searching the result `lookahead` moves deep. Moves that turn out to
    /// be illegal are dropped; the order of `moves` is kept.
    pub fn score_moves(&mut self, board: &Board, moves: &[Move], lookahead: u8) -> Vec<(Move, i64)> {
        moves
            .iter()
            .filter_map(|&mv| {
                let mut child = board.clone();
                match child.make_move(mv) {
                    Ok(true) => {
                        let score = self.maximize(&child, lookahead);
                        tracing::trace!(%mv, score, "scored move");
                        Some((mv, score))
                    }
                    _ => None,
                }
            })
            .collect()
    }

    /// Pick the best move on `board` with a total horizon of `depth` moves
    /// (the move itself plus `depth - 1` further moves).
    ///
    /// Ties go to the last move in enumeration order.
    pub fn search(&mut self, board: &Board, depth: u8) -> SearchResult {
        let start_nodes = self.stats.nodes;
        let moves: Vec<Move> = board.possible_moves().collect();
        let scored = self.score_moves(board, &moves, depth.saturating_sub(1));

        let best = pick_best(&scored);
        SearchResult {
            best_move: best.map(|(mv, _)| mv),
            score: best.map_or_else(|| board.evaluate(), |(_, score)| score),
            nodes: self.stats.nodes - start_nodes,
        }
    }

    /// Accumulated statistics
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Reset accumulated statistics
    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Get statistics about the transposition table.
    #[must_use]
    pub fn tt_stats(&self) -> Option<TTStats> {
        self.tt.as_ref().map(TranspositionTable::stats)
    }

    /// Clear the transposition table.
    pub fn clear_tt(&mut self) {
        if let Some(tt) = &mut self.tt {
            tt.clear();
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Entry with the highest score; a later entry replaces an equal one
pub fn pick_best(scored: &[(Move, i64)]) -> Option<(Move, i64)> {
    scored.iter().fold(None, |best, &(mv, score)| match best {
        Some((_, b)) if score < b => best,
        _ => Some((mv, score)),
    })
}
