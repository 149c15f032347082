use serde::{Deserialize, Serialize};

use super::ReportError;

/// Guess budget of a single puzzle issue
pub const MAX_TRIES: u8 = 4;

/// Outcome of one attempt at a puzzle issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attempt {
    /// Solved within the budget using `tries` guesses (1..=4)
    Completed { tries: u8 },
    /// Every guess was used without solving the puzzle
    Exhausted,
}

impl Attempt {
    /// Builds a completed attempt, rejecting try counts outside the guess budget
    pub fn completed(tries: u8) -> Result<Self, ReportError> {
        if (1..=MAX_TRIES).contains(&tries) {
            Ok(Attempt::Completed { tries })
        } else {
            Err(ReportError::malformed(format!(
                "try count {} is outside 1..={}",
                tries, MAX_TRIES
            )))
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Attempt::Completed { .. })
    }

    /// Number of guesses used; exhausted attempts count the whole budget
    pub fn try_count(&self) -> u8 {
        match self {
            Attempt::Completed { tries } => *tries,
            Attempt::Exhausted => MAX_TRIES,
        }
    }

    /// Decodes the stored `(tries, completed)` pair
    pub fn from_legacy(tries: i32, completed: bool) -> Option<Self> {
        if !completed {
            return (tries == i32::from(MAX_TRIES)).then_some(Attempt::Exhausted);
        }
        u8::try_from(tries)
            .ok()
            .and_then(|tries| Attempt::completed(tries).ok())
    }

    /// Encodes into the stored `(tries, completed)` pair
    pub fn to_legacy(&self) -> (i32, bool) {
        (i32::from(self.try_count()), self.is_completed())
    }
}

/// The payload of one score card, before it is attributed to a player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCard {
    pub issue_number: u32,
    pub attempt: Attempt,
    pub miss_degrees: u32,
}

impl ScoreCard {
    pub fn into_result(self, user_id: &str, display_name: &str, season: u32) -> AngleResult {
        AngleResult {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
            issue_number: self.issue_number,
            attempt: self.attempt,
            miss_degrees: self.miss_degrees,
            season,
        }
    }
}

/// One player's recorded attempt at one puzzle issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleResult {
    pub user_id: String,
    pub display_name: String,
    pub issue_number: u32,
    pub attempt: Attempt,
    pub miss_degrees: u32,
    pub season: u32,
}

impl AngleResult {
    pub fn is_completed(&self) -> bool {
        self.attempt.is_completed()
    }

    pub fn try_count(&self) -> u8 {
        self.attempt.try_count()
    }

    pub fn card(&self) -> ScoreCard {
        ScoreCard {
            issue_number: self.issue_number,
            attempt: self.attempt,
            miss_degrees: self.miss_degrees,
        }
    }
}
