//! Stepwise solver driving the maximizing search
//!
//! Each step enumerates the legal moves of the current board, values every
//! resulting board with a bounded maximizing search, and commits the best
//! one. A (board hash, move) pair is never committed twice, which keeps the
//! solver from oscillating between two boards. The run ends when:
//!
//! 1. **Won**: the board is solved
//! 2. **Step limit**: the configured step budget is used up
//! 3. **Stalled**: every legal move from the current board was already tried
//! 4. **Dead end**: the board has no legal move at all
//!
//! # Example
//!
//! ```
//! use tower::board::{Board, Color, Run, Unit};
//! use tower::engine::{Outcome, Solver, SolverConfig};
//!
//! let red = |r| Unit::new(r, Color::Red).unwrap();
//! let board = Board::from_runs(vec![
//!     Run::from_units(vec![red(7), red(6), red(5), red(4), red(1)]),
//!     Run::from_units(vec![red(3), red(2)]),
//! ]);
//!
//! let mut solver = Solver::new(SolverConfig::default().with_lookahead(2));
//! let report = solver.solve(&board).unwrap();
//! assert_eq!(report.outcome, Outcome::Won);
//! println!("Solved in {} steps ({}ms)", report.steps.len(), report.time_ms);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::board::{Board, Move};
use crate::error::Result;
use crate::search::{pick_best, SearchStats, Searcher};

/// Transposition table size per search thread
const CACHE_MB: usize = 16;

/// Why a solve run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The board reached the winning arrangement
    Won,
    /// Step budget exhausted
    StepLimit,
    /// Every legal move from the current board had already been committed
    Stalled,
    /// No legal move exists
    DeadEnd,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Won => "won",
            Outcome::StepLimit => "step limit reached",
            Outcome::Stalled => "stalled",
            Outcome::DeadEnd => "dead end",
        };
        f.write_str(text)
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Search depth used to value each candidate move
    pub lookahead: u8,
    /// Maximum number of committed moves
    pub max_steps: usize,
    /// Worker threads for valuing sibling moves
    pub threads: usize,
    /// Keep a transposition table per worker
    pub use_cache: bool,
}

impl SolverConfig {
    pub fn with_lookahead(mut self, lookahead: u8) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lookahead: 3,
            max_steps: 50,
            threads: 1,
            use_cache: true,
        }
    }
}

/// One committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub mv: Move,
    /// Search value of the board after the move
    pub score: i64,
    /// Content hash of the board the move was played on
    pub hash: u64,
}

/// Result of a solve run.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: Outcome,
    pub steps: Vec<Step>,
    pub final_board: Board,
    /// Combined statistics of all search workers
    pub stats: SearchStats,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

/// Stepwise solver.
pub struct Solver {
    config: SolverConfig,
    searchers: Vec<Searcher>,
}

impl Solver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        let threads = config.threads.max(1);
        let searchers = (0..threads)
            .map(|_| {
                if config.use_cache {
                    Searcher::new(CACHE_MB)
                } else {
                    Searcher::without_cache()
                }
            })
            .collect();
        Self { config, searchers }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Play from `start` until won, stuck, or out of steps.
    pub fn solve(&mut self, start: &Board) -> Result<SolveReport> {
        let started = Instant::now();
        for searcher in &mut self.searchers {
            searcher.reset_stats();
        }

        let mut current = start.clone();
        let mut used: HashSet<(u64, Move)> = HashSet::new();
        let mut steps = Vec::new();

        let outcome = loop {
            if current.is_won() {
                break Outcome::Won;
            }
            if steps.len() >= self.config.max_steps {
                break Outcome::StepLimit;
            }

            let hash = current.content_hash();
            let moves: Vec<Move> = current.possible_moves().collect();
            if moves.is_empty() {
                break Outcome::DeadEnd;
            }
            let fresh: Vec<Move> = moves
                .into_iter()
                .filter(|mv| !used.contains(&(hash, *mv)))
                .collect();
            if fresh.is_empty() {
                break Outcome::Stalled;
            }

            let scored = self.score_moves(&current, &fresh);
            let Some((mv, score)) = pick_best(&scored) else {
                break Outcome::Stalled;
            };

            used.insert((hash, mv));
            match commit(&mut current, mv, score, hash)? {
                Some(step) => steps.push(step),
                None => {
                    warn!(%mv, "board refused a listed move");
                    break Outcome::Stalled;
                }
            }
            debug!(step = steps.len(), %mv, score, "committed move");
        };

        let mut stats = SearchStats::default();
        for searcher in &self.searchers {
            stats.merge(searcher.stats());
        }
        let time_ms = started.elapsed().as_millis() as u64;
        info!(%outcome, steps = steps.len(), nodes = stats.nodes, time_ms, "solve finished");

        Ok(SolveReport {
            outcome,
            steps,
            final_board: current,
            stats,
            time_ms,
        })
    }

    /// Value candidate moves, splitting them across worker threads when
    /// more than one is configured. Output order follows `moves`.
    fn score_moves(&mut self, board: &Board, moves: &[Move]) -> Vec<(Move, i64)> {
        let lookahead = self.config.lookahead;
        if self.searchers.len() == 1 || moves.len() < 2 {
            return self.searchers[0].score_moves(board, moves, lookahead);
        }

        let chunk = moves.len().div_ceil(self.searchers.len());
        std::thread::scope(|scope| {
            let handles: Vec<_> = moves
                .chunks(chunk)
                .zip(self.searchers.iter_mut())
                .map(|(part, searcher)| {
                    // Each worker plays on its own copy of the board
                    let board = board.clone();
                    scope.spawn(move || searcher.score_moves(&board, part, lookahead))
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(scored) => scored,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}

/// Play `mv` on `board`, returning the step only if the board accepted it.
fn commit(board: &mut Board, mv: Move, score: i64, hash: u64) -> Result<Option<Step>> {
    if board.make_move(mv)? {
        Ok(Some(Step { mv, score, hash }))
    } else {
        Ok(None)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}
