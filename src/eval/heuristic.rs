//! Heuristic evaluation of non-terminal positions
//!
//! Columns are scored independently and summed:
//! - A consecutive column scores `height * sum(rank + 1)`, so long towers
//!   of high ranks dominate.
//! - Any other column is scored on its tallest valid top group (one color,
//!   ranks rising downward with gaps allowed): `height * sum(rank + 1)`
//!   minus `gap_count * gap_sum`, where the gap terms cover the ranks that
//!   would have to be slotted in to make the group consecutive.
//!
//! A won board scores [`EvalScore::WIN`], which no other board can reach.

use crate::board::{Board, Run, Unit};
use crate::rules::is_won;

use super::score::{offset_sum, EvalScore};

/// Evaluate the board. Higher is closer to a win.
#[must_use]
pub fn evaluate(board: &Board) -> i64 {
    if is_won(board) {
        return EvalScore::WIN;
    }
    board.columns().iter().map(column_score).sum()
}

/// Score of a single column
#[must_use]
pub fn column_score(run: &Run) -> i64 {
    let (Some(top), Some(bottom)) = (run.top(), run.units().first().copied()) else {
        return 0;
    };

    if run.is_consecutive() {
        return run.height() as i64 * offset_sum(top.rank(), bottom.rank());
    }

    let depth = run.valid_prefix();
    let group = &run.units()[run.height() - depth..];
    let stack_sum: i64 = group.iter().map(|u| u.rank() as i64 + 1).sum();
    let (missing_height, missing_sum) = gaps(group);

    depth as i64 * stack_sum - missing_height * missing_sum
}

/// Count and offset-sum of ranks absent from a valid group (bottom-to-top)
fn gaps(group: &[Unit]) -> (i64, i64) {
    group.windows(2).fold((0, 0), |(count, sum), w| {
        let (lower, upper) = (w[0].rank(), w[1].rank());
        if lower <= upper + 1 {
            return (count, sum);
        }
        let first = upper + 1;
        let last = lower - 1;
        (
            count + (last - first + 1) as i64,
            sum + offset_sum(first, last),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn run(units: &[(u8, Color)]) -> Run {
        Run::from_units(
            units
                .iter()
                .map(|&(r, c)| Unit::new(r, c).unwrap())
                .collect(),
        )
    }

    fn red(ranks: &[u8]) -> Run {
        run(&ranks.iter().map(|&r| (r, Color::Red)).collect::<Vec<_>>())
    }

    #[test]
    fn test_empty_column_scores_zero() {
        assert_eq!(column_score(&Run::new()), 0);
    }

    #[test]
    fn test_single_unit() {
        // height 1 * (rank + 1)
        assert_eq!(column_score(&red(&[4])), 5);
    }

    #[test]
    fn test_consecutive_column() {
        // 2 * (6 + 5)
        assert_eq!(column_score(&red(&[5, 4])), 22);
        assert_eq!(
            column_score(&red(&[7, 6, 5, 4, 3, 2, 1])),
            EvalScore::COMPLETE_COLUMN
        );
    }

    #[test]
    fn test_gapped_column() {
        // valid group 7,5,4: 3 * (8 + 6 + 5) - 1 * 7
        assert_eq!(column_score(&red(&[7, 5, 4])), 50);
    }

    #[test]
    fn test_only_valid_top_counts() {
        let column = run(&[(2, Color::Cyan), (7, Color::Red), (5, Color::Red), (4, Color::Red)]);
        assert_eq!(column_score(&column), 50);
    }

    #[test]
    fn test_consecutive_beats_gapped() {
        let consecutive = column_score(&red(&[7, 6, 5]));
        let gapped = column_score(&red(&[7, 6, 4]));
        assert_eq!(consecutive, 63);
        assert_eq!(gapped, 54);
        assert!(consecutive > gapped);
    }

    #[test]
    fn test_wider_gap_costs_more() {
        let narrow = column_score(&red(&[7, 5]));
        let wide = column_score(&red(&[7, 2]));
        // 2 * (8 + 6) - 1 * 7 = 21 ; 2 * (8 + 3) - 4 * (4 + 5 + 6 + 7) = -66
        assert_eq!(narrow, 21);
        assert_eq!(wide, -66);
    }

    #[test]
    fn test_won_board_scores_win() {
        let mut columns = vec![Run::new(); 8];
        columns[0] = red(&[7, 6, 5, 4, 3, 2, 1]);
        let board = Board::from_runs(columns);
        assert_eq!(evaluate(&board), EvalScore::WIN);
    }

    #[test]
    fn test_board_sums_columns() {
        let board = Board::from_runs(vec![red(&[5, 4]), red(&[7, 5, 4]), Run::new()]);
        assert_eq!(evaluate(&board), 22 + 50);
        assert!(evaluate(&board) < EvalScore::WIN);
    }
}
