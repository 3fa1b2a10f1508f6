use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use dropblox_engine::{Command, PieceSeed};

use crate::{schema::state::GameState, util::Output};

/// Writes the state and chosen move list of every practice turn as JSON files.
///
/// Files land in `<root>/<seed>_<timestamp>/` as `state<N>.json` and `move<N>.json`.
#[derive(Debug)]
pub struct HistoryLogger {
    dir: PathBuf,
}

impl HistoryLogger {
    pub fn create(root: &Path, seed: PieceSeed, started_at: DateTime<Utc>) -> anyhow::Result<Self> {
        let dir = root.join(format!("{seed}_{}", started_at.format("%Y%m%dT%H%M%SZ")));
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create history directory: {}", dir.display()))?;
        log::info!("Logging game history to {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn log_state(&self, turn: usize, state: &GameState) -> anyhow::Result<()> {
        Output::open(self.dir.join(format!("state{turn}.json")))?.write_json(state)
    }

    pub fn log_moves(&self, turn: usize, commands: &[Command]) -> anyhow::Result<()> {
        Output::open(self.dir.join(format!("move{turn}.json")))?.write_json(&commands)
    }
}

#[cfg(test)]
mod tests {
    use dropblox_engine::GameField;

    use super::*;
    use crate::util;

    #[test]
    fn test_writes_turn_files() {
        let seed: PieceSeed = "000000000000000000000000000000ff".parse().unwrap();
        let started_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let root = std::env::temp_dir().join(format!("dropblox-history-{}", std::process::id()));

        let logger = HistoryLogger::create(&root, seed, started_at).unwrap();
        assert_eq!(
            logger.dir(),
            root.join("000000000000000000000000000000ff_20231114T221320Z")
        );

        let state = GameState::from_board(&GameField::with_seed(seed).board());
        logger.log_state(0, &state).unwrap();
        logger.log_moves(0, &[Command::LEFT, Command::ROTATE]).unwrap();

        let read_state: GameState =
            util::read_json_file("state", logger.dir().join("state0.json")).unwrap();
        assert_eq!(read_state, state);
        let read_moves: Vec<Command> =
            util::read_json_file("move", logger.dir().join("move0.json")).unwrap();
        assert_eq!(read_moves, [Command::LEFT, Command::ROTATE]);

        fs::remove_dir_all(&root).unwrap();
    }
}
