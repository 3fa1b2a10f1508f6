//! Translating a chosen placement into the command list sent to the game.

use dropblox_engine::{Board, Command, MoveCommand};
use serde::Serialize;

/// First move of a search lineage: the horizontal offset from the leftmost legal column
/// and the number of clockwise rotations applied there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MovePlan {
    pub rights: usize,
    pub rotations: usize,
}

impl MovePlan {
    #[must_use]
    pub const fn new(rights: usize, rotations: usize) -> Self {
        Self { rights, rotations }
    }

    /// Returns the commands that realize this plan on `board`.
    ///
    /// The active piece is pushed against the left wall from its start position, then
    /// shifted `rights` columns and rotated `rotations` times. The trailing drop is left
    /// to whoever applies the list.
    #[must_use]
    pub fn commands(&self, board: &Board) -> Vec<Command> {
        let mut piece = board.active_piece().reset_position();
        let mut lefts = 0;
        while let Some(moved) = board.checked_apply(&piece, MoveCommand::Left) {
            piece = moved;
            lefts += 1;
        }

        let mut commands = Vec::with_capacity(lefts + self.rights + self.rotations);
        commands.extend(std::iter::repeat_n(Command::LEFT, lefts));
        commands.extend(std::iter::repeat_n(Command::RIGHT, self.rights));
        commands.extend(std::iter::repeat_n(Command::ROTATE, self.rotations));
        commands
    }
}
