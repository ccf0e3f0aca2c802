use clap::{Parser, Subcommand};

use self::{bench::BenchArg, train::TrainArg, watch::WatchArg};

mod bench;
mod train;
mod watch;

/// Standard board dimensions used by every subcommand.
pub(crate) const BOARD_WIDTH: usize = 10;
pub(crate) const BOARD_HEIGHT: usize = 20;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Watch the agent play in the terminal
    Watch(#[clap(flatten)] WatchArg),
    /// Run headless benchmark games and report score statistics
    Bench(#[clap(flatten)] BenchArg),
    /// Tune heuristic weights with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Watch(WatchArg::default())) {
        Mode::Watch(arg) => watch::run(&arg)?,
        Mode::Bench(arg) => bench::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
    }
    Ok(())
}
