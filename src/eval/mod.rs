//! Evaluation module for the tower puzzle
//!
//! Contains:
//! - Score constants and closed-form rank sums
//! - Heuristic evaluation function

pub mod heuristic;
pub mod score;

pub use heuristic::{column_score, evaluate};
pub use score::EvalScore;
