use std::io::Write as _;

use anyhow::Context as _;
use dropblox_engine::Command;

use crate::util::Output;

use super::StateArg;

#[derive(Debug, Clone, clap::Args)]
pub struct ReplayArg {
    #[clap(flatten)]
    state: StateArg,
    /// Commands to apply, separated by commas or whitespace
    #[arg(long)]
    commands: String,
}

pub fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let commands = Command::parse_list(&arg.commands)?;
    let board = arg.state.load()?.into_board();
    let outcome = board
        .replay_commands(&commands)
        .context("Failed to replay commands")?;

    let mut output = Output::stdout();
    write!(output, "{}", outcome.board.grid())?;
    writeln!(output, "cleared lines: {}", outcome.cleared_lines)?;
    writeln!(output, "score: {}", outcome.score())?;
    output.flush()?;
    Ok(())
}
