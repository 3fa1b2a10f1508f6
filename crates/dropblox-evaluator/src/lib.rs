//! Placement search for Dropblox.
//!
//! The crate turns a [`Board`](dropblox_engine::Board) into the move list for its active
//! piece:
//!
//! 1. **Board evaluation** ([`board_evaluator`]) - Scores a grid plus accumulated score with
//!    a weighted sum of line-clear score, holes and surface evenness.
//! 2. **Beam search** ([`beam_search`]) - Drops the active piece and the next pieces of the
//!    preview in every rotation and column, keeping the best candidates of each ply.
//! 3. **Move plan** ([`move_plan`]) - Replays the first move of the best candidate as
//!    `left`/`right`/`rotate` commands.
//!
//! ```text
//! BeamSearch::search
//!     ↓ scores boards with
//! BoardEvaluator::evaluate
//!     ↓ best candidate
//! MovePlan::commands
//! ```
//!
//! # Example
//!
//! ```
//! use dropblox_engine::{Board, Grid, PieceKind};
//! use dropblox_evaluator::{beam_search::BeamSearch, search_config::SearchConfig};
//!
//! let preview = std::iter::repeat_n(PieceKind::O.shape(), 5).collect();
//! let board = Board::new(Grid::EMPTY, PieceKind::I.shape(), preview);
//!
//! let search = BeamSearch::new(SearchConfig::default());
//! let outcome = search.search(&board).unwrap();
//! let commands = outcome.best().first_move().commands(&board);
//! assert!(!commands.is_empty());
//! ```

use dropblox_engine::PreviewExhaustedError;

pub mod beam_search;
pub mod board_evaluator;
pub mod move_plan;
pub mod search_config;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlanError {
    #[display("block started in an invalid position")]
    InvalidStartPosition,
    #[display("search depth {required} needs {required} preview pieces, got {available}")]
    InsufficientPreview { required: usize, available: usize },
    #[display("{_0}")]
    PreviewExhausted(PreviewExhaustedError),
}

impl From<PreviewExhaustedError> for PlanError {
    fn from(err: PreviewExhaustedError) -> Self {
        Self::PreviewExhausted(err)
    }
}
