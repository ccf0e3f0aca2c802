use blockfall_engine::GameState;
use serde::{Deserialize, Serialize};

/// Weight vector for the placement heuristic.
///
/// The heuristic rewards accumulated score and penalizes stack height, holes,
/// and wells multiplicatively: each penalty divides the value, so a board
/// with many holes is bad regardless of how the other terms look. Weights
/// scale how sharply each term bites.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Multiplier on the game score.
    pub score: f32,
    /// Penalty steepness per covered hole.
    pub holes: f32,
    /// Penalty steepness per occupied row.
    pub height: f32,
    /// Penalty steepness per well beyond the first.
    pub wells: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            score: 1.0,
            holes: 1.0,
            height: 1.0,
            wells: 1.0,
        }
    }
}

impl Weights {
    /// Weights found by the evolutionary trainer.
    pub const TUNED: Self = Self {
        score: 0.534_313_9,
        holes: 0.074_428_17,
        height: 1.005_531_1,
        wells: 1.240_808_3,
    };

    #[must_use]
    pub const fn from_array([score, holes, height, wells]: [f32; 4]) -> Self {
        Self {
            score,
            holes,
            height,
            wells,
        }
    }

    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.score, self.holes, self.height, self.wells]
    }

    /// Scores a resolved state. Higher is better.
    #[must_use]
    pub fn evaluate(&self, state: &GameState) -> f32 {
        self.composite(
            state.score(),
            state.hole_count(),
            state.stack_height(),
            state.well_count(),
        )
    }

    /// One well is free: a single I-shaped shaft is how tetrises are set up.
    #[expect(clippy::cast_precision_loss)]
    fn composite(&self, score: u64, holes: usize, height: usize, wells: usize) -> f32 {
        let tolerated_wells = wells.max(1) - 1;
        score as f32 * self.score
            / (holes as f32 * self.holes + 1.0)
            / (height as f32 * self.height + 1.0)
            / (tolerated_wells as f32 * self.wells + 1.0)
    }
}
