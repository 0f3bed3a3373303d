//! Score constants and rank-series arithmetic for evaluation

use crate::board::{MAX_RANK, MIN_RANK, TOWER_HEIGHT};

/// Evaluation scores
pub struct EvalScore;

impl EvalScore {
    /// Any won position
    pub const WIN: i64 = 1_000_000;
    /// A complete tower in a position that is not yet won
    pub const COMPLETE_COLUMN: i64 = TOWER_HEIGHT as i64 * offset_sum(MIN_RANK, MAX_RANK);
}

/// `1 + 2 + ... + n`
#[inline]
pub const fn triangular(n: i64) -> i64 {
    n * (n + 1) / 2
}

/// Sum of `rank + 1` for every rank in `lo..=hi` (zero when `lo > hi`).
///
/// Ranks are offset by one so that the lowest rank still carries weight.
#[inline]
pub const fn offset_sum(lo: u8, hi: u8) -> i64 {
    if lo > hi {
        return 0;
    }
    triangular(hi as i64 + 1) - triangular(lo as i64)
}
