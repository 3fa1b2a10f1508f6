use dropblox_engine::{Board, Grid, PieceShape};
use serde::{Deserialize, Serialize};

/// Game state handed to the program each turn.
///
/// Fields other than these three are ignored when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Occupancy grid, top row first; nonzero entries are occupied.
    pub bitmap: Grid,
    /// The falling piece at its start position.
    pub block: PieceShape,
    /// Upcoming pieces, next first.
    pub preview: Vec<PieceShape>,
}

impl GameState {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            bitmap: board.grid().clone(),
            block: board.active_piece().shape().clone(),
            preview: board.preview().to_vec(),
        }
    }

    #[must_use]
    pub fn into_board(self) -> Board {
        Board::new(self.bitmap, self.block, self.preview)
    }
}

#[cfg(test)]
mod tests {
    use dropblox_engine::Point;

    use super::*;

    fn bitmap_json(bottom_row: &str) -> String {
        let empty = format!("[{}]", ["0"; Grid::COLS].join(","));
        let mut rows = vec![empty; Grid::ROWS - 1];
        rows.push(bottom_row.to_owned());
        format!("[{}]", rows.join(","))
    }

    #[test]
    fn test_parse_state_ignoring_unknown_fields() {
        let json = format!(
            r#"{{
                "bitmap": {},
                "block": {{"center": {{"i": 1, "j": 5}}, "offsets": [{{"i": 0, "j": 0}}, {{"i": 0, "j": 1}}]}},
                "preview": [{{"center": {{"i": 0, "j": 5}}, "offsets": [{{"i": 0, "j": 0}}]}}],
                "score": 12,
                "state": "playing"
            }}"#,
            bitmap_json("[1,1,0,0,0,0,0,0,0,0,0,2]")
        );
        let state: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state.bitmap, Grid::from_ascii("##.........#"));
        assert_eq!(state.block.center(), Point::new(1, 5));
        assert_eq!(state.block.len(), 2);
        assert_eq!(state.preview.len(), 1);

        let board = state.clone().into_board();
        assert_eq!(GameState::from_board(&board), state);
    }

    #[test]
    fn test_reject_malformed_state() {
        let short_row = bitmap_json("[1,1,0]");
        let json = format!(
            r#"{{"bitmap": {short_row}, "block": {{"center": {{"i": 0, "j": 0}}, "offsets": [{{"i": 0, "j": 0}}]}}, "preview": []}}"#
        );
        assert!(serde_json::from_str::<GameState>(&json).is_err());

        let empty_block = format!(
            r#"{{"bitmap": {}, "block": {{"center": {{"i": 0, "j": 0}}, "offsets": []}}, "preview": []}}"#,
            bitmap_json(&format!("[{}]", ["0"; Grid::COLS].join(",")))
        );
        assert!(serde_json::from_str::<GameState>(&empty_block).is_err());

        let far_block = format!(
            r#"{{"bitmap": {}, "block": {{"center": {{"i": 2147483647, "j": 5}}, "offsets": [{{"i": 1, "j": 0}}]}}, "preview": []}}"#,
            bitmap_json(&format!("[{}]", ["0"; Grid::COLS].join(",")))
        );
        let err = serde_json::from_str::<GameState>(&far_block).unwrap_err();
        assert!(err.to_string().contains("outside"));
    }
}
