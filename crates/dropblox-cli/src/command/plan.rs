use std::time::Duration;

use anyhow::Context as _;
use dropblox_evaluator::beam_search::BeamSearch;

use crate::util::Output;

use super::{SearchArg, StateArg};

/// Share of the remaining seconds the search may spend when `--use-time-budget` is set.
const TIME_BUDGET_FRACTION: f64 = 0.8;

#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlanArg {
    #[clap(flatten)]
    pub(super) state: StateArg,
    /// Seconds left for this turn
    pub(super) seconds_remaining: Option<f64>,
    /// Limit the search to a share of the seconds left
    #[arg(long, requires = "seconds_remaining")]
    use_time_budget: bool,
    #[clap(flatten)]
    pub(super) search: SearchArg,
}

pub fn run(arg: &PlanArg) -> anyhow::Result<()> {
    let board = arg.state.load()?.into_board();
    let mut config = arg.search.load_config()?;

    if let Some(seconds) = arg.seconds_remaining {
        log::info!("{seconds:.3}s remaining");
        if arg.use_time_budget {
            let budget = Duration::try_from_secs_f64(seconds * TIME_BUDGET_FRACTION)
                .context("Invalid seconds remaining")?;
            config.time_budget = Some(config.time_budget.map_or(budget, |b| b.min(budget)));
        }
    }

    let outcome = BeamSearch::new(config)
        .search(&board)
        .context("Failed to plan a move")?;
    let best = outcome.best();
    let plan = best.first_move();
    log::info!(
        "rights={} rotations={} score={}",
        plan.rights,
        plan.rotations,
        best.score()
    );

    Output::stdout().write_commands(&plan.commands(&board))
}
