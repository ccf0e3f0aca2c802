use std::{path::PathBuf, thread};

use blockfall_agent::{Agent, Weights};
use blockfall_engine::{GameState, Seed};
use blockfall_training::stats::Summary;
use rand::Rng as _;

use crate::{
    command::{BOARD_HEIGHT, BOARD_WIDTH},
    model::WeightsModel,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BenchArg {
    /// Number of games to play
    #[clap(long, default_value_t = 20)]
    games: usize,
    /// Stop each game after this many placements
    #[clap(long, default_value_t = 50_000)]
    turn_limit: usize,
    /// Base seed; game `i` plays with `seed + i` (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Path to a trained model file (built-in tuned weights when omitted)
    #[clap(long)]
    model: Option<PathBuf>,
}

pub(crate) fn run(arg: &BenchArg) -> anyhow::Result<()> {
    let BenchArg {
        games,
        turn_limit,
        seed,
        model,
    } = arg;

    let weights = match model {
        Some(path) => WeightsModel::open(path)?.weights,
        None => Weights::TUNED,
    };
    let agent = Agent::new(weights);
    let base_seed = seed.unwrap_or_else(|| rand::rng().random());

    eprintln!("Playing {games} games (base seed {base_seed}, turn limit {turn_limit})");

    let mut scores = vec![0_u64; *games];
    thread::scope(|s| {
        let agent = &agent;
        for (i, slot) in (0_u64..).zip(&mut scores) {
            s.spawn(move || {
                let state = GameState::with_seed(
                    BOARD_WIDTH,
                    BOARD_HEIGHT,
                    Seed(base_seed.wrapping_add(i)),
                )
                .expect("board dimensions are fixed and valid");
                *slot = agent.play(state, *turn_limit);
            });
        }
    });

    for (i, score) in scores.iter().enumerate() {
        eprintln!("  game {i:2}: {score}");
    }

    #[expect(clippy::cast_precision_loss)]
    let summary = Summary::new(scores.iter().map(|&s| s as f32));
    if let Some(summary) = summary {
        eprintln!("Score over {games} games:");
        eprintln!("  Min:  {:.1}", summary.min);
        eprintln!("  Max:  {:.1}", summary.max);
        eprintln!("  Mean: {:.1}", summary.mean);
        eprintln!("  Std:  {:.1}", summary.std_dev);
    }

    Ok(())
}
