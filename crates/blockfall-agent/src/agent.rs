use blockfall_engine::GameState;

use crate::{
    enumerator::{Candidate, enumerate_moves},
    heuristic::Weights,
};

/// Greedy one-ply player: enumerate placements, score each resulting board,
/// replay the best script on the live game.
#[derive(Debug, Clone, Copy, Default)]
pub struct Agent {
    weights: Weights,
}

impl Agent {
    #[must_use]
    pub const fn new(weights: Weights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> Weights {
        self.weights
    }

    /// Plays one placement. Returns `false` when no placement exists, which
    /// on a live game only happens after defeat.
    ///
    /// Ties keep the earliest candidate in enumeration order, so a given
    /// state always produces the same move.
    pub fn step(&self, state: &mut GameState) -> bool {
        let candidates = enumerate_moves(state);
        let mut best: Option<(&Candidate, f32)> = None;
        for candidate in &candidates {
            let value = self.weights.evaluate(&candidate.state);
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((candidate, value));
            }
        }
        let Some((candidate, _)) = best else {
            return false;
        };
        state.apply(&candidate.actions);
        true
    }

    /// Plays a whole game, stopping at defeat or after `max_turns`
    /// placements. Returns the final score.
    #[must_use]
    pub fn play(&self, mut state: GameState, max_turns: usize) -> u64 {
        for _ in 0..max_turns {
            if !self.step(&mut state) {
                break;
            }
        }
        state.score()
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::Seed;

    use super::*;

    #[test]
    fn test_step_replays_the_best_candidate() {
        let start = GameState::with_seed(10, 20, Seed(21)).unwrap();
        let agent = Agent::new(Weights::default());

        let candidates = enumerate_moves(&start);
        let mut best = &candidates[0];
        let mut best_value = agent.weights().evaluate(&best.state);
        for candidate in &candidates[1..] {
            let value = agent.weights().evaluate(&candidate.state);
            if value > best_value {
                best = candidate;
                best_value = value;
            }
        }

        let mut live = start.clone();
        assert!(agent.step(&mut live));
        assert_eq!(live.grid().occupancy(), best.state.grid().occupancy());
        assert_eq!(live.score(), best.state.score());
    }

    #[test]
    fn test_step_fails_after_defeat() {
        let mut state = GameState::with_seed(10, 20, Seed(2)).unwrap();
        while !state.is_defeated() {
            state.apply(&[blockfall_engine::Action::HardDrop]);
        }
        let agent = Agent::new(Weights::TUNED);
        assert!(!agent.step(&mut state));
    }

    #[test]
    fn test_play_accumulates_score() {
        let state = GameState::with_seed(10, 20, Seed(33)).unwrap();
        let agent = Agent::new(Weights::TUNED);
        // every hard drop on an open board travels at least one row
        assert!(agent.play(state, 30) > 0);
    }

    #[test]
    fn test_play_is_deterministic_for_a_seed() {
        let agent = Agent::new(Weights::TUNED);
        let a = agent.play(GameState::with_seed(10, 20, Seed(77)).unwrap(), 100);
        let b = agent.play(GameState::with_seed(10, 20, Seed(77)).unwrap(), 100);
        assert_eq!(a, b);
    }
}
