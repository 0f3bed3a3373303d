//! Tower puzzle solver
//!
//! A single-player stacking puzzle played on a row of columns:
//! - Each unit has a rank (1-7) and one of six colors
//! - A move lifts the top run of units from one column onto another
//! - Only a run that is consecutive (same color, ranks one apart) may move
//! - The puzzle is won when every column is empty or holds a full 7-to-1
//!   tower of a single color
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Units, runs and the board
//! - [`rules`]: Move legality, enumeration and win detection
//! - [`eval`]: Static heuristic evaluation
//! - [`search`]: Maximizing search, transposition table and game tree
//! - [`engine`]: Stepwise solver driving the search
//! - [`layout`]: Text layout loader
//! - [`render`]: Plain-text board rendering
//!
//! # Quick Start
//!
//! ```
//! use tower::{parse_layout, Outcome, Solver, SolverConfig};
//!
//! let board = parse_layout("7R, 3R\n6R, 2R\n5R\n4R\n1R\n", 2).unwrap();
//! let mut solver = Solver::new(SolverConfig::default());
//! let report = solver.solve(&board).unwrap();
//!
//! assert_eq!(report.outcome, Outcome::Won);
//! for step in &report.steps {
//!     println!("{} (score {})", step.mv, step.score);
//! }
//! println!("{}", report.final_board);
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod layout;
pub mod render;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Color, Move, Run, Unit, COLUMNS, MAX_RANK, MIN_RANK, TOWER_HEIGHT};
pub use engine::{Outcome, SolveReport, Solver, SolverConfig, Step};
pub use error::{Result, TowerError};
pub use layout::{load_layout, parse_layout};
pub use search::{GameTree, Searcher, TreeLimits};
