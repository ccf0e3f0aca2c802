pub use self::{
    agent::Agent,
    enumerator::{Candidate, enumerate_moves},
    heuristic::Weights,
};

pub mod agent;
pub mod enumerator;
pub mod heuristic;
