use crate::report::{AngleResult, Attempt};

use super::super::ScoreCalculator;

/// Points for a miss; solves earn more the fewer guesses they took
pub const EXHAUSTED_POINTS: u32 = 5;

pub struct TryCountScoreCalculator;

impl Default for TryCountScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TryCountScoreCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for TryCountScoreCalculator {
    fn score(&self, result: &AngleResult) -> u32 {
        match result.attempt {
            Attempt::Exhausted => EXHAUSTED_POINTS,
            Attempt::Completed { tries: 1 } => 100,
            Attempt::Completed { tries: 2 } => 50,
            Attempt::Completed { tries: 3 } => 30,
            Attempt::Completed { .. } => 15,
        }
    }
}
