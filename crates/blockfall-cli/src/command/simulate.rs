use std::path::PathBuf;

use anyhow::ensure;
use blockfall_engine::{Action, GameState};

use crate::{driver::Driver, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed of the piece sequence
    #[clap(long, default_value_t = 0)]
    pub(crate) seed: u32,
    /// Maximum number of timer periods to run
    #[clap(long, default_value_t = 10_000)]
    pub(crate) ticks: u64,
    /// Hard-drop the active piece every N periods
    #[clap(long)]
    pub(crate) hard_drop_every: Option<u64>,
    /// Output file path for the final state (JSON); stdout if omitted
    #[clap(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    ensure!(
        arg.hard_drop_every != Some(0),
        "--hard-drop-every must be at least 1"
    );

    eprintln!("Simulating up to {} periods with seed {}...", arg.ticks, arg.seed);
    let (state, periods) = simulate(arg);
    eprintln!(
        "Stopped after {periods} periods: score {}, level {}, {} lines{}",
        state.score,
        state.level,
        state.cleared_lines,
        if state.game_over { ", game over" } else { "" }
    );

    util::write_json(&state, arg.output.as_deref())
}

/// Runs the timer loop, returning the final state and the periods actually run.
fn simulate(arg: &SimulateArg) -> (GameState, u64) {
    let mut driver = Driver::new(arg.seed);
    let mut periods = 0;
    while periods < arg.ticks && !driver.state().game_over {
        driver.advance_period();
        periods += 1;
        if let Some(every) = arg.hard_drop_every
            && periods % every == 0
        {
            driver.dispatch(Action::HardDrop);
        }
    }
    (driver.state().clone(), periods)
}
