//! Board simulation for the Dropblox falling-block puzzle.
//!
//! - [`core`] - Geometry and rules: [`Point`], [`Piece`], [`Grid`], [`Board`] and the
//!   [`Command`] vocabulary.
//! - [`engine`] - Game-level helpers used to drive local games: [`GameField`],
//!   [`GameStats`] and the seeded [`PieceBuffer`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// An unrecognized move token was passed to the command interpreter.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid command {token:?}")]
pub struct InvalidCommandError {
    pub token: String,
}

/// A piece was dropped while no preview piece was left to take its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no preview piece left to promote")]
pub struct PreviewExhaustedError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ReplayError {
    #[display("{_0}")]
    InvalidCommand(InvalidCommandError),
    #[display("block started in an invalid position")]
    InvalidStartPosition,
    #[display("block reached an invalid position at command #{index} ({command})")]
    InvalidReachedPosition { index: usize, command: Command },
    #[display("{_0}")]
    PreviewExhausted(PreviewExhaustedError),
}

impl From<InvalidCommandError> for ReplayError {
    fn from(err: InvalidCommandError) -> Self {
        Self::InvalidCommand(err)
    }
}

impl From<PreviewExhaustedError> for ReplayError {
    fn from(err: PreviewExhaustedError) -> Self {
        Self::PreviewExhausted(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidShapeError {
    #[display("piece has no cells")]
    Empty,
    #[display("piece has {len} cells, at most {max} are supported")]
    TooManyCells { len: usize, max: usize },
    #[display("piece coordinate {value} is outside -{limit}..={limit}")]
    CoordinateOutOfRange { value: i32, limit: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridShapeError {
    #[display("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[display("expected {expected} columns in row {row}, got {actual}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
