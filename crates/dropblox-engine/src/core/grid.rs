use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GridShapeError;

use super::{piece::Piece, point::Point};

const FULL_ROW_MASK: u16 = (1 << Grid::COLS) - 1;

/// Single row of the grid as a bitmask; bit `j` is column `j`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRow {
    bits: u16,
}

impl BitRow {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const FULL: Self = Self {
        bits: FULL_ROW_MASK,
    };

    /// Checks if every column of the row is occupied.
    #[inline]
    #[must_use]
    pub fn is_filled(self) -> bool {
        self.bits == FULL_ROW_MASK
    }

    #[inline]
    #[must_use]
    pub fn is_cell_occupied(self, j: usize) -> bool {
        (self.bits & (1 << j)) != 0
    }

    #[inline]
    fn occupy_cell(&mut self, j: usize) {
        self.bits |= 1 << j;
    }

    #[must_use]
    pub fn count_occupied(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn iter_cells(self) -> impl Iterator<Item = bool> {
        (0..Grid::COLS).map(move |j| self.is_cell_occupied(j))
    }
}

/// Fixed-size occupancy grid.
///
/// Row 0 is the top of the board. Cells outside the grid are treated as walls by
/// [`Grid::is_free`].
///
/// Serializes as the game-state `bitmap`: `ROWS` arrays of `COLS` integers, where any
/// nonzero value is an occupied cell.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: [BitRow; Grid::ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const ROWS: usize = 33;
    pub const COLS: usize = 12;

    pub const EMPTY: Self = Self {
        rows: [BitRow::EMPTY; Self::ROWS],
    };

    /// Builds a grid from rows of cells, top row first.
    pub fn from_rows<R, C>(rows: R) -> Result<Self, GridShapeError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = bool>,
    {
        let mut grid = Self::EMPTY;
        let mut row_count = 0;
        for (i, cells) in rows.into_iter().enumerate() {
            row_count += 1;
            if i >= Self::ROWS {
                continue;
            }
            let mut col_count = 0;
            for (j, occupied) in cells.into_iter().enumerate() {
                col_count += 1;
                if occupied && j < Self::COLS {
                    grid.rows[i].occupy_cell(j);
                }
            }
            if col_count != Self::COLS {
                return Err(GridShapeError::ColumnCount {
                    row: i,
                    expected: Self::COLS,
                    actual: col_count,
                });
            }
        }
        if row_count != Self::ROWS {
            return Err(GridShapeError::RowCount {
                expected: Self::ROWS,
                actual: row_count,
            });
        }
        Ok(grid)
    }

    /// Creates a grid from ASCII art for testing and diagnostics.
    ///
    /// `#` is an occupied cell, `.` an empty one, and every row must be `COLS` cells wide.
    /// Rows are given top to bottom; when fewer than `ROWS` rows are given they describe
    /// the bottom of the grid and the rows above are empty.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= Self::ROWS,
            "At most {} rows are allowed, got {}",
            Self::ROWS,
            lines.len()
        );

        let mut grid = Self::EMPTY;
        let top = Self::ROWS - lines.len();
        for (y, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                Self::COLS,
                "Each row must have exactly {} cells, got {} at row {}",
                Self::COLS,
                chars.len(),
                y
            );
            for (j, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    grid.rows[top + y].occupy_cell(j);
                }
            }
        }
        grid
    }

    pub fn rows(&self) -> impl Iterator<Item = BitRow> + '_ {
        self.rows.iter().copied()
    }

    fn index(point: Point) -> Option<(usize, usize)> {
        let i = usize::try_from(point.i).ok().filter(|&i| i < Self::ROWS)?;
        let j = usize::try_from(point.j).ok().filter(|&j| j < Self::COLS)?;
        Some((i, j))
    }

    /// Checks if `point` is inside the grid and unoccupied.
    #[must_use]
    pub fn is_free(&self, point: Point) -> bool {
        Self::index(point).is_some_and(|(i, j)| !self.rows[i].is_cell_occupied(j))
    }

    #[must_use]
    pub fn is_occupied(&self, i: usize, j: usize) -> bool {
        self.rows[i].is_cell_occupied(j)
    }

    /// Occupies a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `point` is outside the grid.
    pub fn occupy(&mut self, point: Point) {
        let Some((i, j)) = Self::index(point) else {
            panic!("cell {point:?} is outside the grid");
        };
        self.rows[i].occupy_cell(j);
    }

    /// Stamps every cell of `piece` as occupied.
    ///
    /// The piece must be in a legal position.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for cell in piece.cells() {
            self.occupy(cell);
        }
    }

    /// Clears filled rows and returns the number of rows cleared.
    ///
    /// Rows are scanned bottom to top; every row above a cleared row moves down by the
    /// number of rows cleared below it, and the top rows are emptied.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for i in (0..Self::ROWS).rev() {
            if self.rows[i].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[i + count] = self.rows[i];
            }
        }
        self.rows[..count].fill(BitRow::EMPTY);
        count
    }

    #[must_use]
    pub fn count_occupied(&self) -> usize {
        self.rows.iter().map(|row| row.count_occupied() as usize).sum()
    }

    /// Returns the row index of the topmost occupied cell in column `j`, or `ROWS` if
    /// the column is empty.
    #[must_use]
    pub fn column_top(&self, j: usize) -> usize {
        self.rows
            .iter()
            .position(|row| row.is_cell_occupied(j))
            .unwrap_or(Self::ROWS)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {{")?;
        fmt::Display::fmt(self, f)?;
        write!(f, "}}")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for occupied in row.iter_cells() {
                f.write_str(if occupied { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let bitmap: Vec<Vec<u8>> = self
            .rows
            .iter()
            .map(|row| row.iter_cells().map(u8::from).collect())
            .collect();
        bitmap.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bitmap = Vec::<Vec<i64>>::deserialize(deserializer)?;
        Self::from_rows(
            bitmap
                .into_iter()
                .map(|row| row.into_iter().map(|cell| cell != 0)),
        )
        .map_err(serde::de::Error::custom)
    }
}
