//! Weight vector operations for the genetic algorithm.
//!
//! Initialization, BLX-α crossover, and Gaussian mutation over flat weight
//! vectors. All operators clamp results to `[0.0, max_weight]`.

use std::array;
use std::ops::RangeInclusive;

use rand::Rng;
use rand_distr::Normal;

/// Flat weight vector evolved by the genetic algorithm, in the order expected
/// by [`Weights::from_array`](blockfall_agent::Weights::from_array).
pub type WeightVector = [f32; 4];

/// Generates a random weight vector with each weight drawn uniformly from
/// `range`.
pub fn random<R>(rng: &mut R, range: RangeInclusive<f32>) -> WeightVector
where
    R: Rng + ?Sized,
{
    array::from_fn(|_| rng.random_range(range.clone()))
}

/// Performs BLX-α (blend crossover) between two parent weight vectors.
///
/// Each offspring weight is sampled uniformly from the parents' range at that
/// position, expanded on both sides by `alpha` times the parent distance.
/// `alpha = 0.0` keeps offspring strictly between the parents; larger values
/// explore beyond them.
pub fn blx_alpha<R>(
    p1: &WeightVector,
    p2: &WeightVector,
    alpha: f32,
    max_weight: f32,
    rng: &mut R,
) -> WeightVector
where
    R: Rng + ?Sized,
{
    array::from_fn(|i| {
        let min = f32::min(p1[i], p2[i]);
        let max = f32::max(p1[i], p2[i]);
        let d = max - min;
        let lower = min - alpha * d;
        let upper = max + alpha * d;
        rng.random_range(lower..=upper).clamp(0.0, max_weight)
    })
}

/// Applies Gaussian mutation to a weight vector in-place.
///
/// Each weight is perturbed with probability `rate` by noise drawn from
/// `N(0, sigma²)`, then clamped.
pub fn mutate<R>(weights: &mut WeightVector, sigma: f32, max_weight: f32, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, sigma).unwrap();
    for w in weights {
        if rng.random_bool(rate.into()) {
            *w = (*w + rng.sample(normal)).clamp(0.0, max_weight);
        }
    }
}
