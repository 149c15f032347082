pub mod calculators;
pub mod service;

mod errors;
pub mod models;
pub mod repository;
mod standings;
mod streak;

pub use errors::{SeasonArgumentError, StatsError};
pub use models::*;
pub use repository::{InMemoryResultRepository, PostgresResultRepository, ResultRepository};
pub use service::StatsService;
pub use standings::compute_standings;
pub use streak::{compute_stats, count_one_guess};

use crate::report::AngleResult;

/// Points a single result contributes to the leaderboard
pub trait ScoreCalculator: Send + Sync {
    fn score(&self, result: &AngleResult) -> u32;
}
