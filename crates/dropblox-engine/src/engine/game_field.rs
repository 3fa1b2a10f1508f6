use crate::{
    ReplayError,
    core::{board::Board, command::Command, grid::Grid, piece::Piece},
};

use super::{
    piece_buffer::{PieceBuffer, PieceSeed},
    piece_kind::PieceKind,
};

/// Live state of a practice game, standing in for the game server.
///
/// The field owns the grid, the falling piece and the piece queue. Decisions are made
/// on [`Board`] snapshots; the resulting move list is fed back through
/// [`Self::apply_commands`].
#[derive(Debug, Clone)]
pub struct GameField {
    grid: Grid,
    falling_piece: PieceKind,
    piece_buffer: PieceBuffer,
}

impl GameField {
    /// Number of upcoming pieces exposed in each snapshot.
    pub const PREVIEW_SIZE: usize = 5;

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut piece_buffer = PieceBuffer::with_seed(seed);
        let falling_piece = piece_buffer.pop_next();
        Self {
            grid: Grid::EMPTY,
            falling_piece,
            piece_buffer,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> PieceKind {
        self.falling_piece
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.piece_buffer.next_pieces().take(Self::PREVIEW_SIZE)
    }

    /// Returns the board a player would be shown: grid, falling piece and preview.
    #[must_use]
    pub fn board(&self) -> Board {
        let preview = self.next_pieces().map(PieceKind::shape).collect();
        Board::new(self.grid.clone(), self.falling_piece.shape(), preview)
    }

    /// Returns `true` when the falling piece cannot even be placed at its start position.
    #[must_use]
    pub fn is_topped_out(&self) -> bool {
        let piece = Piece::new(self.falling_piece.shape());
        !piece.cells().all(|cell| self.grid.is_free(cell))
    }

    /// Replays `commands` for the falling piece, locks it and draws the next piece.
    ///
    /// Returns the number of cleared rows. On error the field is left unchanged.
    pub fn apply_commands(&mut self, commands: &[Command]) -> Result<usize, ReplayError> {
        let outcome = self.board().replay_commands(commands)?;
        self.grid = outcome.board.grid().clone();
        self.falling_piece = self.piece_buffer.pop_next();
        Ok(outcome.cleared_lines)
    }
}
