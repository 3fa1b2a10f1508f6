use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A row/column coordinate on the grid.
///
/// `i` is the row (0 = top, increasing downward), `j` is the column
/// (0 = left, increasing rightward). Field names follow the game-state JSON.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub i: i32,
    pub j: i32,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.i + rhs.i, self.j + rhs.j)
    }
}
