//! Search module for the tower puzzle
//!
//! Contains:
//! - Transposition table for caching search values
//! - Bounded maximizing search (no adversary)
//! - Exhaustive game-tree enumeration with shortest-win extraction
//! - Progress observers for tree expansion

pub mod maximize;
pub mod observer;
pub mod tree;
pub mod tt;

pub use maximize::{pick_best, SearchResult, SearchStats, Searcher};
pub use observer::{LevelRecorder, NoOpObserver, TreeObserver};
pub use tree::{GameTree, Solution, TreeLimits, TreeNode, TreeStats};
pub use tt::{TTEntry, TTStats, TranspositionTable};
