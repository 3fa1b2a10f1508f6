//! Game-level helpers for driving a local game.
//!
//! The decision engine itself only needs [`crate::core`]. These types play the part of
//! the game server when running practice games:
//!
//! - [`GameField`] - The live grid, the falling piece and the piece queue
//! - [`GameStats`] - Score and line-clear statistics
//! - [`PieceBuffer`] - 7-bag piece generation over the [`PieceKind`] tetrominoes
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Initialize [`GameField`] with a seed
//! 2. Take a [`Board`](crate::Board) snapshot and decide on a move list
//! 3. Apply the move list with [`GameField::apply_commands`] (the piece is dropped)
//! 4. Repeat until [`GameField::is_topped_out`]
//!
//! # Example
//!
//! ```
//! use dropblox_engine::{Command, GameField, GameStats};
//! use rand::Rng as _;
//!
//! let mut field = GameField::with_seed(rand::rng().random());
//! let mut stats = GameStats::new();
//!
//! let cleared_lines = field.apply_commands(&[Command::LEFT, Command::ROTATE]).unwrap();
//! stats.complete_piece_drop(cleared_lines);
//!
//! assert_eq!(stats.completed_pieces(), 1);
//! ```

pub use self::{game_field::*, game_stats::*, piece_buffer::*, piece_kind::*};

mod game_field;
mod game_stats;
mod piece_buffer;
mod piece_kind;
