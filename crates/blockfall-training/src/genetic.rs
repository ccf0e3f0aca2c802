//! Genetic algorithm over heuristic weight vectors.
//!
//! Individuals are weight vectors scored by playing full games. Evolution is
//! the classic loop: evaluate fitness, keep the elites, then fill the rest of
//! the next generation with tournament-selected parents crossed by BLX-α and
//! perturbed by Gaussian mutation.
//!
//! Fitness evaluation is parallelized with scoped threads, one per
//! individual. All individuals of a generation play the same game seeds.

use std::ops::RangeInclusive;
use std::thread;

use rand::{Rng, seq::IndexedRandom};

use blockfall_agent::{Agent, Weights};
use blockfall_engine::{GameState, Grid, GridSizeError, Seed};

use crate::{
    stats::Summary,
    weights::{self, WeightVector},
};

/// Board dimensions and turn limit shared by every fitness game.
#[derive(Debug, Clone, Copy)]
pub struct GameSetup {
    width: usize,
    height: usize,
    turn_limit: usize,
}

impl GameSetup {
    /// Validates the board dimensions up front so fitness games cannot fail
    /// to start.
    pub fn new(width: usize, height: usize, turn_limit: usize) -> Result<Self, GridSizeError> {
        Grid::new(width, height)?;
        Ok(Self {
            width,
            height,
            turn_limit,
        })
    }

    #[must_use]
    pub fn turn_limit(&self) -> usize {
        self.turn_limit
    }
}

/// A single candidate solution: a weight vector and its fitness score.
#[derive(Debug, Clone)]
pub struct Individual {
    weights: WeightVector,
    fitness: f32,
}

impl Individual {
    /// Creates an individual with weights drawn uniformly from `init_range`.
    pub fn random<R>(rng: &mut R, init_range: RangeInclusive<f32>) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            weights: weights::random(rng, init_range),
            fitness: f32::MIN,
        }
    }

    #[must_use]
    pub fn weights(&self) -> WeightVector {
        self.weights
    }

    /// Mean terminal game score over the evaluation seeds. Higher is better.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    #[expect(clippy::cast_precision_loss)]
    fn evaluate(&self, setup: &GameSetup, seeds: &[Seed]) -> f32 {
        let agent = Agent::new(Weights::from_array(self.weights));
        let total: u64 = seeds
            .iter()
            .map(|&seed| {
                let state = GameState::with_seed(setup.width, setup.height, seed)
                    .expect("dimensions are validated when the setup is built");
                agent.play(state, setup.turn_limit)
            })
            .sum();
        total as f32 / seeds.len() as f32
    }
}

/// A generation of individuals evaluated together.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates a population of `count` random individuals.
    pub fn random<R>(count: usize, rng: &mut R, init_range: RangeInclusive<f32>) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::random(rng, init_range.clone()))
            .collect();
        Population { individuals }
    }

    /// Returns the individuals, best first after evaluation.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Evaluates fitness for all individuals in parallel, one thread each,
    /// then sorts the population by fitness descending.
    ///
    /// Every individual plays the same `seeds`, so scores within a
    /// generation differ only by strategy.
    pub fn evaluate_fitness(&mut self, setup: &GameSetup, seeds: &[Seed]) {
        assert!(!seeds.is_empty());
        thread::scope(|s| {
            for ind in &mut self.individuals {
                s.spawn(move || {
                    ind.fitness = ind.evaluate(setup, seeds);
                });
            }
        });

        // sort by fitness descending
        self.individuals
            .sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap());
    }

    /// Fitness distribution of the current generation.
    #[must_use]
    pub fn fitness_summary(&self) -> Option<Summary> {
        Summary::new(self.individuals.iter().map(|ind| ind.fitness))
    }
}

/// Evolution parameters controlling selection, crossover, and mutation.
#[derive(Debug)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged.
    pub elite_count: usize,
    /// Weights are clipped to `[0, max_weight]` by every operator.
    pub max_weight: f32,
    /// Tournament size for selection (larger = stronger pressure).
    pub tournament_size: usize,
    /// Standard deviation of Gaussian mutation noise.
    pub mutation_sigma: f32,
    /// BLX-α range expansion beyond the parents.
    pub blx_alpha: f32,
    /// Per-weight mutation probability.
    pub mutation_rate: f32,
}

impl PopulationEvolver {
    /// Produces the next generation: elites carry over unchanged, the rest
    /// are bred by tournament selection, BLX-α crossover, and mutation.
    ///
    /// The input population must already be sorted by fitness descending
    /// (as [`Population::evaluate_fitness`] leaves it).
    #[must_use]
    pub fn evolve(&self, population: &Population) -> Population {
        let mut rng = rand::rng();
        assert!(
            population
                .individuals
                .is_sorted_by(|a, b| a.fitness >= b.fitness)
        );

        let mut next_individuals = vec![];
        next_individuals.extend(population.individuals[..self.elite_count].iter().cloned());

        while next_individuals.len() < population.individuals.len() {
            let p1 = tournament_select(&population.individuals, self.tournament_size, &mut rng);
            let p2 = tournament_select(&population.individuals, self.tournament_size, &mut rng);

            let mut child = weights::blx_alpha(
                &p1.weights,
                &p2.weights,
                self.blx_alpha,
                self.max_weight,
                &mut rng,
            );
            weights::mutate(
                &mut child,
                self.mutation_sigma,
                self.max_weight,
                self.mutation_rate,
                &mut rng,
            );

            next_individuals.push(Individual {
                weights: child,
                fitness: f32::MIN,
            });
        }

        Population {
            individuals: next_individuals,
        }
    }
}

/// Picks the fittest of `tournament_size` randomly chosen individuals.
fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    population
        .choose_multiple(rng, tournament_size)
        .max_by(|a, b| a.fitness.partial_cmp(&b.fitness).unwrap())
        .unwrap()
}
