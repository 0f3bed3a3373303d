//! Game rules for the tower puzzle
//!
//! This module implements the rule set including:
//! - Move legality and execution
//! - Lazy legal-move enumeration
//! - Win detection

pub mod moves;
pub mod win;

// Re-exports for convenient access
pub use moves::{is_valid_move, make_move, possible_moves, PossibleMoves};
pub use win::{is_complete_tower, is_won};
