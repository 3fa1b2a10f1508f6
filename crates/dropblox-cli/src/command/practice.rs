use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use dropblox_engine::{GameField, GameStats, PieceSeed};
use dropblox_evaluator::beam_search::BeamSearch;
use rand::Rng as _;
use serde::Serialize;

use crate::{history::HistoryLogger, schema::state::GameState, util::Output};

use super::SearchArg;

#[derive(Debug, Clone, clap::Args)]
pub struct PracticeArg {
    /// Piece sequence seed as 32 hexadecimal digits (random if omitted)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Maximum number of pieces to play
    #[arg(long, default_value_t = 1000)]
    turns: usize,
    /// Directory to log every turn's state and moves into
    #[arg(long)]
    history_dir: Option<PathBuf>,
    #[clap(flatten)]
    search: SearchArg,
}

#[derive(Debug, Serialize)]
struct PracticeSummary {
    seed: PieceSeed,
    turns: usize,
    topped_out: bool,
    stats: GameStats,
    history_dir: Option<PathBuf>,
}

pub fn run(arg: &PracticeArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Practice game with seed {seed}");

    let history = arg
        .history_dir
        .as_deref()
        .map(|root| HistoryLogger::create(root, seed, Utc::now()))
        .transpose()?;
    let search = BeamSearch::new(arg.search.load_config()?);
    let mut field = GameField::with_seed(seed);
    let mut stats = GameStats::new();

    let mut turns = 0;
    while turns < arg.turns && !field.is_topped_out() {
        let board = field.board();
        if let Some(history) = &history {
            history.log_state(turns, &GameState::from_board(&board))?;
        }

        let outcome = search
            .search(&board)
            .with_context(|| format!("Failed to plan turn {turns}"))?;
        let commands = outcome.best().first_move().commands(&board);
        if let Some(history) = &history {
            history.log_moves(turns, &commands)?;
        }

        match field.apply_commands(&commands) {
            Ok(cleared_lines) => stats.complete_piece_drop(cleared_lines),
            Err(err) => {
                log::warn!("Turn {turns} rejected: {err}");
                break;
            }
        }
        turns += 1;
        log::debug!("turn {turns}: score={}", stats.score());
    }

    let topped_out = field.is_topped_out();
    log::info!(
        "Game over after {turns} turns: score={} lines={}",
        stats.score(),
        stats.total_cleared_lines()
    );
    let summary = PracticeSummary {
        seed,
        turns,
        topped_out,
        stats,
        history_dir: history.map(|history| history.dir().to_path_buf()),
    };
    Output::stdout().write_json(&summary)
}
