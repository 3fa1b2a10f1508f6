//! Heuristic value of a board after a sequence of drops.
//!
//! The value is `score * w_score - holes * w_hole - evenness * w_evenness`:
//!
//! - **score**: line-clear score accumulated along the candidate's lineage
//! - **holes**: empty cells with an occupied cell somewhere above them in the same
//!   column; every empty cell of the top row also counts as a hole
//! - **evenness**: sum of squared height differences between adjacent columns, where
//!   the height of a column is the row index of its topmost occupied cell (`ROWS` when
//!   the column is empty)

use std::fmt;

use dropblox_engine::Grid;
use serde::{Deserialize, Serialize};

/// Scores grids for the beam search. Higher is better.
pub trait BoardEvaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, grid: &Grid, score: u64) -> i64;
}

/// Multipliers of the three heuristic terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub score: i64,
    pub hole: i64,
    pub evenness: i64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            score: 100,
            hole: 3,
            evenness: 1,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }
}

impl BoardEvaluator for HeuristicEvaluator {
    fn evaluate(&self, grid: &Grid, score: u64) -> i64 {
        let score = i64::try_from(score).unwrap_or(i64::MAX);
        let holes = to_i64(count_holes(grid));
        let evenness = to_i64(evenness(grid));
        score
            .saturating_mul(self.weights.score)
            .saturating_sub(holes.saturating_mul(self.weights.hole))
            .saturating_sub(evenness.saturating_mul(self.weights.evenness))
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Counts empty cells covered by an occupied cell, plus every empty cell of row 0.
#[must_use]
pub fn count_holes(grid: &Grid) -> usize {
    let mut covered = [false; Grid::COLS];
    let mut holes = 0;
    for (i, row) in grid.rows().enumerate() {
        for (j, occupied) in row.iter_cells().enumerate() {
            if occupied {
                covered[j] = true;
            } else if i == 0 || covered[j] {
                holes += 1;
            }
        }
    }
    holes
}

/// Sum of squared differences between the heights of adjacent columns.
#[must_use]
pub fn evenness(grid: &Grid) -> usize {
    let mut tops = (0..Grid::COLS).map(|j| grid.column_top(j));
    let Some(mut prev) = tops.next() else {
        return 0;
    };
    tops.map(|top| {
        let diff = prev.abs_diff(top);
        prev = top;
        diff * diff
    })
    .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_counts_top_row_as_holes() {
        assert_eq!(count_holes(&Grid::EMPTY), Grid::COLS);
        assert_eq!(evenness(&Grid::EMPTY), 0);
        let evaluator = HeuristicEvaluator::default();
        assert_eq!(evaluator.evaluate(&Grid::EMPTY, 0), -36);
        assert_eq!(evaluator.evaluate(&Grid::EMPTY, 2), 200 - 36);
    }

    #[test]
    fn test_holes_under_overhangs() {
        let grid = Grid::from_ascii(
            r"
            .#..........
            ..#.........
            .#.#........
            ",
        );
        // Column 1 has one covered gap, column 2 has one, column 3 none.
        assert_eq!(count_holes(&grid), Grid::COLS + 2);
    }

    #[test]
    fn test_filled_top_row_has_no_row_zero_holes() {
        let grid = Grid::from_rows((0..Grid::ROWS).map(|i| [i == 0; Grid::COLS])).unwrap();
        // Every cell below the full top row is covered.
        assert_eq!(count_holes(&grid), (Grid::ROWS - 1) * Grid::COLS);
    }

    #[test]
    fn test_evenness() {
        let grid = Grid::from_ascii(
            r"
            #...........
            #.#.........
            ##########..
            ",
        );
        // Heights: 30, 32, 31, 32 x7, 33, 33.
        assert_eq!(evenness(&grid), 4 + 1 + 1 + 1);
    }

    #[test]
    fn test_custom_weights() {
        let grid = Grid::from_ascii("#...........");
        let evaluator = HeuristicEvaluator::new(HeuristicWeights {
            score: 10,
            hole: 0,
            evenness: 2,
        });
        assert_eq!(evaluator.evaluate(&grid, 1), 10 - 2);
    }
}
