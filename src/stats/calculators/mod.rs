mod try_count;

pub use try_count::TryCountScoreCalculator;
