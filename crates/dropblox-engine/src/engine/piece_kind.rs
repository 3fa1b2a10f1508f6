use crate::core::{piece::PieceShape, point::Point};

/// Tetromino used by practice games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    O = 1,
    S = 2,
    Z = 3,
    J = 4,
    L = 5,
    T = 6,
}

/// Center of every spawned piece: second row, left of the middle column.
const SPAWN_CENTER: Point = Point::new(1, 5);

const fn p(i: i32, j: i32) -> Point {
    Point::new(i, j)
}

const PIECE_OFFSETS: [[Point; 4]; PieceKind::LEN] = [
    // I-piece
    [p(0, -1), p(0, 0), p(0, 1), p(0, 2)],
    // O-piece
    [p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
    // S-piece
    [p(0, 0), p(0, 1), p(1, -1), p(1, 0)],
    // Z-piece
    [p(0, -1), p(0, 0), p(1, 0), p(1, 1)],
    // J-piece
    [p(-1, -1), p(0, -1), p(0, 0), p(0, 1)],
    // L-piece
    [p(-1, 1), p(0, -1), p(0, 0), p(0, 1)],
    // T-piece
    [p(-1, 0), p(0, -1), p(0, 0), p(0, 1)],
];

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::S,
        Self::Z,
        Self::J,
        Self::L,
        Self::T,
    ];

    /// Returns the shape of this piece centered at the spawn point.
    #[must_use]
    pub fn shape(self) -> PieceShape {
        PieceShape::from_known_offsets(SPAWN_CENTER, &PIECE_OFFSETS[self as usize])
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, Grid, MoveCommand};

    use super::*;

    #[test]
    fn test_every_kind_spawns_legally_in_every_rotation_after_one_step_down() {
        for kind in PieceKind::ALL {
            let board = Board::new(Grid::EMPTY, kind.shape(), vec![]);
            let spawned = board.active_piece();
            assert!(board.check(spawned), "{kind:?} spawns illegally");

            let mut piece = spawned.moved(MoveCommand::Down);
            for _ in 0..4 {
                assert!(board.check(&piece), "{kind:?} rotation blocked");
                piece = piece.moved(MoveCommand::Rotate);
            }
        }
    }

    #[test]
    fn test_every_kind_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            assert_eq!(shape.len(), 4);
            let mut offsets = shape.offsets().to_vec();
            offsets.sort_by_key(|p| (p.i, p.j));
            offsets.dedup();
            assert_eq!(offsets.len(), 4);
        }
    }
}
