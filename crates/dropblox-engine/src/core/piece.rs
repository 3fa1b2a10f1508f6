use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::InvalidShapeError;

use super::{command::MoveCommand, point::Point};

/// The rigid shape of a polyomino: a center and the offsets of its cells at rotation 0.
///
/// Serializes as the game-state block object: `{"center": {..}, "offsets": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPieceShape")]
pub struct PieceShape {
    center: Point,
    offsets: ArrayVec<Point, { Piece::MAX_CELLS }>,
}

#[derive(Deserialize)]
struct RawPieceShape {
    center: Point,
    offsets: Vec<Point>,
}

impl TryFrom<RawPieceShape> for PieceShape {
    type Error = InvalidShapeError;

    fn try_from(raw: RawPieceShape) -> Result<Self, Self::Error> {
        Self::new(raw.center, raw.offsets)
    }
}

impl PieceShape {
    /// Largest magnitude accepted for a center or offset coordinate.
    ///
    /// Anything this far out cannot touch the grid; the bound keeps cell arithmetic
    /// from overflowing.
    pub const COORDINATE_LIMIT: i32 = 256;

    pub fn new<I>(center: Point, offsets: I) -> Result<Self, InvalidShapeError>
    where
        I: IntoIterator<Item = Point>,
    {
        let offsets: Vec<Point> = offsets.into_iter().collect();
        if offsets.is_empty() {
            return Err(InvalidShapeError::Empty);
        }
        let limit = Self::COORDINATE_LIMIT;
        if let Some(value) = std::iter::once(&center)
            .chain(&offsets)
            .flat_map(|point| [point.i, point.j])
            .find(|value| value.unsigned_abs() > limit.unsigned_abs())
        {
            return Err(InvalidShapeError::CoordinateOutOfRange { value, limit });
        }
        let len = offsets.len();
        let offsets = ArrayVec::try_from(offsets.as_slice()).map_err(|_| {
            InvalidShapeError::TooManyCells {
                len,
                max: Piece::MAX_CELLS,
            }
        })?;
        Ok(Self { center, offsets })
    }

    /// Builds a shape from offsets known to be valid.
    pub(crate) fn from_known_offsets(center: Point, offsets: &[Point]) -> Self {
        assert!(!offsets.is_empty() && offsets.len() <= Piece::MAX_CELLS);
        Self {
            center,
            offsets: offsets.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn offsets(&self) -> &[Point] {
        &self.offsets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Rotation state of a piece, one of four 90° steps.
///
/// Rotation wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const COUNT: usize = 4;

    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % 4)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn unrotated(self) -> Self {
        Self((self.0 + 3) % 4)
    }

    /// Maps an offset defined at rotation 0 into this rotation.
    ///
    /// Odd rotations swap axes with a sign flip scaled by `2 - r`; even rotations
    /// scale both axes by `1 - r`. Offsets are expressed as (row, column), so this
    /// is not the textbook (x, y) rotation matrix.
    #[must_use]
    pub fn transform(self, offset: Point) -> Point {
        let r = i32::from(self.0);
        if r % 2 == 1 {
            let scale = 2 - r;
            Point::new(scale * offset.j, -scale * offset.i)
        } else {
            let scale = 1 - r;
            Point::new(scale * offset.i, scale * offset.j)
        }
    }
}

/// Absolute grid cell of `offset` for a piece at `center + translation` in `rotation`.
#[must_use]
pub fn absolute_cell(
    center: Point,
    translation: Point,
    rotation: PieceRotation,
    offset: Point,
) -> Point {
    let rotated = rotation.transform(offset);
    Point::new(
        center.i + translation.i + rotated.i,
        center.j + translation.j + rotated.j,
    )
}

/// A piece placed on the board: a shape with a translation and rotation.
///
/// Pieces are values. Movement returns a new `Piece` and leaves the original untouched,
/// so trying a move never needs to be reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    shape: PieceShape,
    translation: Point,
    rotation: PieceRotation,
}

impl Piece {
    pub const MAX_CELLS: usize = 10;

    /// Creates a piece at its start position (no translation, rotation 0).
    #[must_use]
    pub fn new(shape: PieceShape) -> Self {
        Self {
            shape,
            translation: Point::ORIGIN,
            rotation: PieceRotation::default(),
        }
    }

    #[must_use]
    pub fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub fn translation(&self) -> Point {
        self.translation
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    /// Returns the absolute cells occupied by this piece.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.shape.offsets.iter().map(move |&offset| {
            absolute_cell(self.shape.center, self.translation, self.rotation, offset)
        })
    }

    /// Returns this piece moved back to its start position.
    #[must_use]
    pub fn reset_position(&self) -> Self {
        Self::new(self.shape.clone())
    }

    #[must_use]
    pub fn moved(&self, command: MoveCommand) -> Self {
        let Point { i, j } = self.translation;
        let mut piece = self.clone();
        match command {
            MoveCommand::Left => piece.translation = Point::new(i, j - 1),
            MoveCommand::Right => piece.translation = Point::new(i, j + 1),
            MoveCommand::Up => piece.translation = Point::new(i - 1, j),
            MoveCommand::Down => piece.translation = Point::new(i + 1, j),
            MoveCommand::Rotate => piece.rotation = self.rotation.rotated(),
            MoveCommand::Unrotate => piece.rotation = self.rotation.unrotated(),
        }
        piece
    }
}
