use std::sync::Arc;

use crate::{PreviewExhaustedError, ReplayError};

use super::{
    command::{Command, MoveCommand},
    grid::Grid,
    piece::{Piece, PieceShape},
};

/// Score awarded for clearing `cleared_lines` rows with a single drop: `2^n - 1`.
///
/// ```
/// use dropblox_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(1), 1);
/// assert_eq!(line_clear_score(4), 15);
/// ```
#[must_use]
pub const fn line_clear_score(cleared_lines: usize) -> u64 {
    (1 << cleared_lines) - 1
}

/// Result of dropping a piece: the next board and the number of rows it cleared.
#[derive(Debug, Clone)]
pub struct DropOutcome {
    pub board: Board,
    pub cleared_lines: usize,
}

impl DropOutcome {
    #[must_use]
    pub fn score(&self) -> u64 {
        line_clear_score(self.cleared_lines)
    }
}

/// Snapshot of the game: the occupancy grid, the active piece and the preview queue.
///
/// A board is never mutated after it is built. Dropping a piece produces a new board
/// that owns its own grid and active piece; the preview shapes are shared read-only
/// between all boards forked from the same input and are addressed by index.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    active: Piece,
    preview: Arc<[PieceShape]>,
    next_preview: usize,
}

impl Board {
    /// Creates a board with `active` at its start position.
    #[must_use]
    pub fn new(grid: Grid, active: PieceShape, preview: Vec<PieceShape>) -> Self {
        Self {
            grid,
            active: Piece::new(active),
            preview: preview.into(),
            next_preview: 0,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    /// Returns the preview shapes that have not been promoted yet.
    #[must_use]
    pub fn preview(&self) -> &[PieceShape] {
        &self.preview[self.next_preview..]
    }

    /// Checks that every cell of `piece` is inside the grid and unoccupied.
    #[must_use]
    pub fn check(&self, piece: &Piece) -> bool {
        piece.cells().all(|cell| self.grid.is_free(cell))
    }

    /// Applies `command` to `piece` if the result is legal on this board.
    ///
    /// Returns `None` when the moved piece would be illegal; `piece` itself is never
    /// modified.
    #[must_use]
    pub fn checked_apply(&self, piece: &Piece, command: MoveCommand) -> Option<Piece> {
        Some(piece.moved(command)).filter(|moved| self.check(moved))
    }

    /// Moves `piece` as far up as legal, then as far left as legal.
    ///
    /// This is the reference position horizontal offsets are counted from.
    #[must_use]
    pub fn canonical_position(&self, piece: &Piece) -> Piece {
        let piece = self.slide(piece.clone(), MoveCommand::Up);
        self.slide(piece, MoveCommand::Left)
    }

    /// Repeats `command` while the result stays legal.
    #[must_use]
    pub fn slide(&self, piece: Piece, command: MoveCommand) -> Piece {
        let mut piece = piece;
        while let Some(moved) = self.checked_apply(&piece, command) {
            piece = moved;
        }
        piece
    }

    /// Returns the lowest legal position reached by moving `piece` straight down.
    #[must_use]
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        self.slide(piece.clone(), MoveCommand::Down)
    }

    /// Drops `piece` from its current position and locks it into the grid.
    ///
    /// The piece must start in a legal position. Full rows are cleared and the head of
    /// the preview queue becomes the active piece of the returned board.
    pub fn drop_piece(&self, piece: &Piece) -> Result<DropOutcome, PreviewExhaustedError> {
        debug_assert!(self.check(piece), "dropped piece must start legal");
        let next_active = self
            .preview
            .get(self.next_preview)
            .ok_or(PreviewExhaustedError)?;

        let resting = self.drop_position(piece);
        let mut grid = self.grid.clone();
        grid.fill_piece(&resting);
        let cleared_lines = grid.clear_lines();

        let board = Self {
            grid,
            active: Piece::new(next_active.clone()),
            preview: Arc::clone(&self.preview),
            next_preview: self.next_preview + 1,
        };
        Ok(DropOutcome {
            board,
            cleared_lines,
        })
    }

    /// Resets the active piece, applies `commands` and drops it.
    ///
    /// Every intermediate position must be legal. Replay stops at the first
    /// [`Command::Drop`]; if there is none the piece is dropped after the last command.
    pub fn replay_commands(&self, commands: &[Command]) -> Result<DropOutcome, ReplayError> {
        let mut piece = self.active.reset_position();
        if !self.check(&piece) {
            return Err(ReplayError::InvalidStartPosition);
        }
        for (index, &command) in commands.iter().enumerate() {
            let Command::Move(move_command) = command else {
                break;
            };
            piece = piece.moved(move_command);
            if !self.check(&piece) {
                return Err(ReplayError::InvalidReachedPosition { index, command });
            }
        }
        Ok(self.drop_piece(&piece)?)
    }

    /// Like [`Self::replay_commands`], but parses the command tokens first.
    pub fn replay_tokens<I, S>(&self, tokens: I) -> Result<DropOutcome, ReplayError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commands = tokens
            .into_iter()
            .map(|token| token.as_ref().parse())
            .collect::<Result<Vec<Command>, _>>()?;
        self.replay_commands(&commands)
    }
}
