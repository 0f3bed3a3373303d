//! A single column of stacked units

use std::fmt;

use super::Unit;
use crate::error::{Result, TowerError};

/// Odd multiplier for the per-unit fold, larger than any unit hash
const RUN_HASH_STEP: u64 = 101;

/// Ordered column of units with LIFO access.
///
/// Units are stored bottom-to-top, so the top of the run is the last
/// element. Group operations (`pop_n`, `top_n`, `push_run`) keep the
/// bottom-to-top order of the group they move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Run {
    units: Vec<Unit>,
}

impl Run {
    pub fn new() -> Self {
        Self { units: Vec::new() }
    }

    /// Build a run from units listed bottom-to-top
    pub fn from_units(units: Vec<Unit>) -> Self {
        Self { units }
    }

    /// Number of units held
    #[inline]
    pub fn height(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units bottom-to-top
    #[inline]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Place a unit on top
    #[inline]
    pub fn push(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    /// Place another run on top, keeping its internal order
    pub fn push_run(&mut self, mut other: Run) {
        self.units.append(&mut other.units);
    }

    /// Remove the top unit
    #[inline]
    pub fn pop(&mut self) -> Option<Unit> {
        self.units.pop()
    }

    /// Remove the top `n` units as a new run, in their original order
    pub fn pop_n(&mut self, n: usize) -> Result<Run> {
        let start = self.split_point(n)?;
        Ok(Run {
            units: self.units.split_off(start),
        })
    }

    /// Peek the top unit
    #[inline]
    pub fn top(&self) -> Option<Unit> {
        self.units.last().copied()
    }

    /// Copy of the top `n` units; `self` is left untouched
    pub fn top_n(&self, n: usize) -> Result<Run> {
        Ok(Run::from_units(self.top_slice(n)?.to_vec()))
    }

    /// Borrow the top `n` units (bottom-to-top)
    #[inline]
    pub fn top_slice(&self, n: usize) -> Result<&[Unit]> {
        let start = self.split_point(n)?;
        Ok(&self.units[start..])
    }

    /// Same color throughout, rank rising by exactly one per step downward
    #[inline]
    pub fn is_consecutive(&self) -> bool {
        is_consecutive(&self.units)
    }

    /// Same color throughout, rank strictly rising downward (gaps allowed)
    #[inline]
    pub fn is_valid(&self) -> bool {
        is_valid(&self.units)
    }

    /// Length of the longest consecutive group at the top of the run
    pub fn consecutive_prefix(&self) -> usize {
        top_prefix(&self.units, |upper, lower| upper.stacks_on(lower))
    }

    /// Length of the longest valid group at the top of the run
    pub fn valid_prefix(&self) -> usize {
        top_prefix(&self.units, |upper, lower| {
            upper.color() == lower.color() && lower.rank() > upper.rank()
        })
    }

    /// Order-sensitive content hash, folded bottom-to-top
    pub fn content_hash(&self) -> u64 {
        self.units.iter().fold(0u64, |h, unit| {
            h.wrapping_add(unit.content_hash())
                .wrapping_mul(RUN_HASH_STEP)
        })
    }

    fn split_point(&self, n: usize) -> Result<usize> {
        self.units
            .len()
            .checked_sub(n)
            .ok_or(TowerError::Capacity {
                requested: n,
                available: self.units.len(),
            })
    }
}

/// Consecutive check over a bottom-to-top slice
pub(crate) fn is_consecutive(units: &[Unit]) -> bool {
    units.windows(2).all(|w| w[1].stacks_on(w[0]))
}

/// Valid check over a bottom-to-top slice
pub(crate) fn is_valid(units: &[Unit]) -> bool {
    units
        .windows(2)
        .all(|w| w[0].color() == w[1].color() && w[0].rank() > w[1].rank())
}

/// Count units from the top while each (upper, lower) pair satisfies `linked`
fn top_prefix(units: &[Unit], linked: impl Fn(Unit, Unit) -> bool) -> usize {
    if units.is_empty() {
        return 0;
    }
    let pairs = units
        .windows(2)
        .rev()
        .take_while(|w| linked(w[1], w[0]))
        .count();
    pairs + 1
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", unit)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn unit(rank: u8, color: Color) -> Unit {
        Unit::new(rank, color).unwrap()
    }

    fn red_run(ranks: &[u8]) -> Run {
        Run::from_units(ranks.iter().map(|&r| unit(r, Color::Red)).collect())
    }

    #[test]
    fn test_push_pop_height() {
        let mut run = Run::new();
        assert!(run.is_empty());
        run.push(unit(3, Color::Red));
        run.push(unit(2, Color::Red));
        assert_eq!(run.height(), 2);
        assert_eq!(run.top(), Some(unit(2, Color::Red)));
        assert_eq!(run.pop(), Some(unit(2, Color::Red)));
        assert_eq!(run.height(), 1);
        assert_eq!(run.pop(), Some(unit(3, Color::Red)));
        assert_eq!(run.pop(), None);
        assert_eq!(run.height(), 0);
    }

    #[test]
    fn test_pop_n_keeps_order() {
        let mut run = red_run(&[7, 6, 5, 4]);
        let taken = run.pop_n(3).unwrap();
        assert_eq!(taken, red_run(&[6, 5, 4]));
        assert_eq!(run, red_run(&[7]));
    }

    #[test]
    fn test_pop_n_capacity_error() {
        let mut run = red_run(&[3, 2]);
        let err = run.pop_n(3).unwrap_err();
        assert!(matches!(
            err,
            TowerError::Capacity {
                requested: 3,
                available: 2
            }
        ));
        assert_eq!(run.height(), 2);
        assert!(run.top_n(5).is_err());
    }

    #[test]
    fn test_pop_push_restores_run() {
        let original = Run::from_units(vec![
            unit(7, Color::Cyan),
            unit(4, Color::Red),
            unit(3, Color::Red),
            unit(1, Color::Green),
        ]);
        for n in 0..=original.height() {
            let mut run = original.clone();
            let taken = run.pop_n(n).unwrap();
            assert_eq!(taken.height(), n);
            run.push_run(taken);
            assert_eq!(run, original, "pop_n({}) then push_run must restore", n);
        }
    }

    #[test]
    fn test_top_n_does_not_mutate() {
        let run = red_run(&[5, 4, 3]);
        let top = run.top_n(2).unwrap();
        assert_eq!(top, red_run(&[4, 3]));
        assert_eq!(run, red_run(&[5, 4, 3]));
    }

    #[test]
    fn test_clone_is_independent() {
        let run = red_run(&[6, 5]);
        let mut copy = run.clone();
        assert_eq!(copy, run);
        assert_eq!(copy.content_hash(), run.content_hash());

        copy.pop();
        assert_eq!(run.height(), 2);
        assert_ne!(copy.content_hash(), run.content_hash());
    }

    #[test]
    fn test_consecutive_and_valid() {
        assert!(Run::new().is_consecutive());
        assert!(red_run(&[4]).is_consecutive());
        assert!(red_run(&[5, 4, 3]).is_consecutive());
        assert!(red_run(&[5, 4, 3]).is_valid());

        let gapped = red_run(&[5, 3]);
        assert!(gapped.is_valid());
        assert!(!gapped.is_consecutive());

        let rising = red_run(&[3, 4]);
        assert!(!rising.is_valid());

        let mixed = Run::from_units(vec![unit(4, Color::Red), unit(3, Color::Cyan)]);
        assert!(!mixed.is_valid());
        assert!(!mixed.is_consecutive());
    }

    #[test]
    fn test_consecutive_implies_valid() {
        let runs = [
            red_run(&[2, 1]),
            red_run(&[7, 6, 5, 4, 3, 2, 1]),
            red_run(&[6, 4, 3]),
            red_run(&[1, 2]),
        ];
        for run in &runs {
            if run.is_consecutive() {
                assert!(run.is_valid(), "{} is consecutive but not valid", run);
            }
        }
    }

    #[test]
    fn test_prefix_lengths() {
        assert_eq!(Run::new().consecutive_prefix(), 0);
        assert_eq!(red_run(&[7, 3, 2, 1]).consecutive_prefix(), 3);
        assert_eq!(red_run(&[7, 3, 2, 1]).valid_prefix(), 4);
        assert_eq!(red_run(&[1, 6, 4]).valid_prefix(), 2);
        assert_eq!(red_run(&[1, 6, 4]).consecutive_prefix(), 1);
    }

    #[test]
    fn test_content_hash_order_sensitive() {
        let a = Run::from_units(vec![unit(3, Color::Red), unit(2, Color::Cyan)]);
        let b = Run::from_units(vec![unit(2, Color::Cyan), unit(3, Color::Red)]);
        assert_ne!(a.content_hash(), b.content_hash());
        assert_eq!(Run::new().content_hash(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(red_run(&[3, 2]).to_string(), "[3R, 2R]");
        assert_eq!(Run::new().to_string(), "[]");
    }
}
