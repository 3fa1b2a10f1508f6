pub use self::{board::*, command::*, grid::*, piece::*, point::*};

pub(crate) mod board;
pub(crate) mod command;
pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod point;
