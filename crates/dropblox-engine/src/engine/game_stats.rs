use serde::Serialize;

use crate::core::{board::line_clear_score, piece::Piece};

/// Running statistics of a practice game.
///
/// Every drop scores `2^n - 1` for `n` rows cleared at once. The histogram has one
/// bucket per possible row count; a piece of at most [`Piece::MAX_CELLS`] cells cannot
/// span more rows than that.
///
/// ```
/// use dropblox_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
/// stats.complete_piece_drop(0);
///
/// assert_eq!(stats.score(), 15);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: u64,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; Piece::MAX_CELLS + 1],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; Piece::MAX_CELLS + 1],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Number of drops per cleared-row count; index 0 counts drops that cleared nothing.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; Piece::MAX_CELLS + 1] {
        &self.line_cleared_counter
    }

    /// Records one locked piece that cleared `cleared_lines` rows.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score += line_clear_score(cleared_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_drops() {
        let mut stats = GameStats::new();
        for cleared in [0, 1, 2, 1, 3] {
            stats.complete_piece_drop(cleared);
        }
        assert_eq!(stats.score(), 1 + 3 + 1 + 7);
        assert_eq!(stats.completed_pieces(), 5);
        assert_eq!(stats.total_cleared_lines(), 7);
        assert_eq!(&stats.line_cleared_counter()[..4], [1, 2, 1, 1]);
    }

    #[test]
    fn test_serializes_as_summary() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["score"], 3);
        assert_eq!(json["completed_pieces"], 1);
        assert_eq!(json["line_cleared_counter"][2], 1);
    }
}
