use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use dropblox_evaluator::search_config::SearchConfig;

use crate::{schema::state::GameState, util};

use self::{plan::PlanArg, practice::PracticeArg, replay::ReplayArg};

mod plan;
mod practice;
mod replay;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    #[clap(flatten)]
    plan: PlanArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Choose the move list for the current piece (default)
    Plan(#[clap(flatten)] PlanArg),
    /// Apply a move list to a game state and show the result
    Replay(#[clap(flatten)] ReplayArg),
    /// Play a local game against a seeded piece sequence
    Practice(#[clap(flatten)] PracticeArg),
}

/// Where the game state JSON comes from.
#[derive(Debug, Clone, Default, clap::Args)]
struct StateArg {
    /// Game state JSON
    state: Option<String>,
    /// Read the game state JSON from a file instead
    #[arg(long, conflicts_with = "state")]
    state_file: Option<PathBuf>,
}

impl StateArg {
    /// Loads the state from the argument, the file, or stdin when neither is given.
    fn load(&self) -> anyhow::Result<GameState> {
        match (&self.state, &self.state_file) {
            (Some(json), _) => {
                serde_json::from_str(json).context("Failed to parse game state argument")
            }
            (None, Some(path)) => util::read_json_file("game state", path),
            (None, None) => util::read_json_stdin("game state"),
        }
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
struct SearchArg {
    /// Search configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of pieces to look ahead
    #[arg(long)]
    depth: Option<usize>,
    /// Number of candidates kept per ply
    #[arg(long)]
    beam_width: Option<usize>,
}

impl SearchArg {
    fn load_config(&self) -> anyhow::Result<SearchConfig> {
        let mut config: SearchConfig = match &self.config {
            Some(path) => util::read_json_file("search config", path)?,
            None => SearchConfig::default(),
        };
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(beam_width) = self.beam_width {
            config.beam_width = beam_width;
        }
        log::debug!("search config: {config:?}");
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Plan(args.plan)) {
        Mode::Plan(arg) => plan::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
        Mode::Practice(arg) => practice::run(&arg)?,
    }
    Ok(())
}
