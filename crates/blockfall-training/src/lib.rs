//! Evolutionary tuning of the placement heuristic weights.
//!
//! A genetic algorithm evolves populations of weight vectors: each individual
//! plays full games with its weights and is scored by the mean terminal game
//! score. Selection is by tournament, crossover is BLX-α, mutation is
//! Gaussian, and the top individuals carry over unchanged each generation.
//!
//! Weights are *not* normalized between generations. The heuristic's penalty
//! terms each add a constant before dividing, so scaling the whole vector
//! changes placement rankings; the magnitudes themselves are part of the
//! solution.
//!
//! Fitness evaluation runs every individual on the same set of game seeds, so
//! a generation's scores differ only by strategy, not by piece luck.

pub mod genetic;
pub mod stats;
pub mod weights;
