use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("No games played yet")]
    NoDataAvailable,

    #[error(transparent)]
    InvalidSeasonArgument(#[from] SeasonArgumentError),

    #[error("Repository error: {0}")]
    Repository(String),
}

/// Why a season argument could not be turned into a [`super::Scope`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonArgumentError {
    #[error("{0} is not a valid season")]
    NotANumber(String),

    #[error("Seasons start at 1")]
    BeforeFirstSeason,

    #[error("Season {requested} has not started, we are only on season {current}")]
    AfterCurrentSeason { requested: u32, current: u32 },
}
