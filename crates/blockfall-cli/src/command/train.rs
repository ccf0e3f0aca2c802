use std::path::PathBuf;

use blockfall_agent::Weights;
use blockfall_training::genetic::{GameSetup, Population, PopulationEvolver};
use chrono::Utc;
use rand::Rng as _;

use crate::{
    command::{BOARD_HEIGHT, BOARD_WIDTH},
    model::WeightsModel,
};

const GAMES_PER_INDIVIDUAL: usize = 3;
const TURN_LIMIT: usize = 2000;

const INIT_WEIGHT_MIN: f32 = 0.5;
const INIT_WEIGHT_MAX: f32 = 1.5;
const MAX_WEIGHT: f32 = 4.0;

const ELITE_COUNT: usize = 2;
const TOURNAMENT_SIZE: usize = 3;
const MUTATION_SIGMA: f32 = 0.1;
const MUTATION_RATE: f32 = 0.3;
const BLX_ALPHA: f32 = 0.5;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of generations to evolve
    #[clap(long, default_value_t = 40)]
    generations: usize,
    /// Individuals per generation
    #[clap(long, default_value_t = 15)]
    population: usize,
    /// Output file path (stdout when omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        generations,
        population: population_count,
        output,
    } = arg;

    let setup = GameSetup::new(BOARD_WIDTH, BOARD_HEIGHT, TURN_LIMIT)?;
    let evolver = PopulationEvolver {
        elite_count: ELITE_COUNT,
        max_weight: MAX_WEIGHT,
        tournament_size: TOURNAMENT_SIZE,
        mutation_sigma: MUTATION_SIGMA,
        blx_alpha: BLX_ALPHA,
        mutation_rate: MUTATION_RATE,
    };

    let mut rng = rand::rng();
    let mut population =
        Population::random(*population_count, &mut rng, INIT_WEIGHT_MIN..=INIT_WEIGHT_MAX);

    for generation in 0..*generations {
        eprintln!("Generation #{generation}:");

        // fresh seeds each generation, shared by every individual
        let seeds: Vec<_> = (0..GAMES_PER_INDIVIDUAL).map(|_| rng.random()).collect();
        population.evaluate_fitness(&setup, &seeds);

        eprintln!("  Individuals:");
        for (i, ind) in population.individuals().iter().enumerate() {
            eprintln!("  {i:2}: {:.3?} => {:.1}", ind.weights(), ind.fitness());
        }
        if let Some(summary) = population.fitness_summary() {
            eprintln!("  Fitness Stats:");
            eprintln!("    Min:  {:.1}", summary.min);
            eprintln!("    Max:  {:.1}", summary.max);
            eprintln!("    Mean: {:.1}", summary.mean);
        }

        if generation + 1 < *generations {
            population = evolver.evolve(&population);
        }
    }

    let best = population
        .individuals()
        .first()
        .expect("population is never empty");
    eprintln!("Training completed.");
    eprintln!("  Best weights: {:.3?}", best.weights());
    eprintln!("  Best fitness: {:.1}", best.fitness());

    let model = WeightsModel {
        trained_at: Utc::now(),
        fitness: best.fitness(),
        weights: Weights::from_array(best.weights()),
    };
    model.save(output.as_ref())?;

    if let Some(path) = output {
        eprintln!("Model saved to {}", path.display());
    }

    Ok(())
}
