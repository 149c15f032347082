use chrono::{DateTime, Utc};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{
    calculators::TryCountScoreCalculator, compute_standings, compute_stats, count_one_guess,
    repository::ResultRepository, PlayerStats, ScoreCalculator, Scope, Standing, StatsError,
};
use crate::calendar::current_season;
use crate::report::AngleResult;

/// Records results and answers the statistics queries
pub struct StatsService {
    repository: Arc<dyn ResultRepository>,
    calculator: Arc<dyn ScoreCalculator>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn ResultRepository>) -> Self {
        Self::builder(repository).build()
    }

    pub fn builder(repository: Arc<dyn ResultRepository>) -> StatsServiceBuilder {
        StatsServiceBuilder::new(repository)
    }

    /// Resolves a chat season argument against the season running at `now`
    pub fn scope_for(&self, argument: Option<&str>, now: DateTime<Utc>) -> Result<Scope, StatsError> {
        Ok(Scope::from_argument(argument, current_season(now))?)
    }

    #[instrument(skip(self, result), fields(user_id = %result.user_id, issue = result.issue_number))]
    pub async fn record_result(&self, result: &AngleResult) -> Result<(), StatsError> {
        self.repository.insert_result(result).await?;
        info!(
            tries = result.try_count(),
            completed = result.is_completed(),
            miss_degrees = result.miss_degrees,
            season = result.season,
            "Result recorded"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn player_stats(&self, user_id: &str, scope: Scope) -> Result<PlayerStats, StatsError> {
        let results = self.repository.list_results_for_user(user_id, scope).await?;
        debug!(result_count = results.len(), "Computing player stats");
        compute_stats(&results)
    }

    #[instrument(skip(self))]
    pub async fn standings(&self, scope: Scope) -> Result<Vec<Standing>, StatsError> {
        let results = match scope {
            Scope::Season(season) => self.repository.list_results_for_season(season).await?,
            Scope::All => self.repository.list_all_results().await?,
        };
        debug!(result_count = results.len(), "Computing standings");

        let standings = compute_standings(&results, scope, self.calculator.as_ref());
        if standings.is_empty() {
            return Err(StatsError::NoDataAvailable);
        }
        Ok(standings)
    }

    #[instrument(skip(self))]
    pub async fn one_guess_count(&self, user_id: &str) -> Result<u32, StatsError> {
        let results = self
            .repository
            .list_results_for_user(user_id, Scope::All)
            .await?;
        Ok(count_one_guess(&results))
    }
}

pub struct StatsServiceBuilder {
    repository: Arc<dyn ResultRepository>,
    calculator: Arc<dyn ScoreCalculator>,
}

impl StatsServiceBuilder {
    fn new(repository: Arc<dyn ResultRepository>) -> Self {
        Self {
            repository,
            calculator: Arc::new(TryCountScoreCalculator::new()),
        }
    }

    pub fn with_calculator(mut self, calculator: Arc<dyn ScoreCalculator>) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn build(self) -> StatsService {
        StatsService {
            repository: self.repository,
            calculator: self.calculator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Attempt;
    use crate::stats::{InMemoryResultRepository, SeasonArgumentError};
    use chrono::TimeZone;

    fn sample_result(user_id: &str, issue_number: u32, attempt: Attempt, season: u32) -> AngleResult {
        AngleResult {
            user_id: user_id.to_string(),
            display_name: user_id.to_string(),
            issue_number,
            attempt,
            miss_degrees: 0,
            season,
        }
    }

    struct FlatScoreCalculator;

    impl ScoreCalculator for FlatScoreCalculator {
        fn score(&self, _result: &AngleResult) -> u32 {
            1
        }
    }

    #[tokio::test]
    async fn recorded_results_feed_player_stats() {
        let service = StatsService::new(Arc::new(InMemoryResultRepository::new()));

        for result in [
            sample_result("alice", 1106, Attempt::Completed { tries: 2 }, 1),
            sample_result("alice", 1108, Attempt::Completed { tries: 1 }, 1),
            sample_result("alice", 1107, Attempt::Completed { tries: 3 }, 1),
        ] {
            service.record_result(&result).await.unwrap();
        }

        let stats = service.player_stats("alice", Scope::Season(1)).await.unwrap();
        assert_eq!(stats.played, 3);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.max_streak, 3);
        assert_eq!(service.one_guess_count("alice").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn player_without_results_has_no_data() {
        let service = StatsService::new(Arc::new(InMemoryResultRepository::new()));

        let result = service.player_stats("ghost", Scope::All).await;
        assert!(matches!(result, Err(StatsError::NoDataAvailable)));
        assert_eq!(service.one_guess_count("ghost").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn standings_respect_scope() {
        let repo = Arc::new(InMemoryResultRepository::with_results(vec![
            sample_result("alice", 10, Attempt::Completed { tries: 1 }, 1),
            sample_result("bob", 40, Attempt::Completed { tries: 2 }, 2),
        ]));
        let service = StatsService::new(repo);

        let season_two = service.standings(Scope::Season(2)).await.unwrap();
        assert_eq!(season_two.len(), 1);
        assert_eq!(season_two[0].user_id, "bob");

        let all = service.standings(Scope::All).await.unwrap();
        assert_eq!(all[0].user_id, "alice");
        assert_eq!(all[0].score, 100);

        let empty = service.standings(Scope::Season(3)).await;
        assert!(matches!(empty, Err(StatsError::NoDataAvailable)));
    }

    #[tokio::test]
    async fn honors_custom_calculator() {
        let repo = Arc::new(InMemoryResultRepository::with_results(vec![
            sample_result("alice", 10, Attempt::Completed { tries: 1 }, 1),
            sample_result("alice", 11, Attempt::Exhausted, 1),
        ]));
        let service = StatsService::builder(repo)
            .with_calculator(Arc::new(FlatScoreCalculator))
            .build();

        let standings = service.standings(Scope::All).await.unwrap();
        assert_eq!(standings[0].score, 2);
    }

    #[test]
    fn scope_for_validates_against_current_season() {
        let service = StatsService::new(Arc::new(InMemoryResultRepository::new()));
        let now = Utc.with_ymd_and_hms(2025, 9, 15, 12, 0, 0).unwrap();

        assert_eq!(service.scope_for(None, now).unwrap(), Scope::Season(3));
        assert_eq!(service.scope_for(Some("all"), now).unwrap(), Scope::All);
        assert_eq!(service.scope_for(Some("2"), now).unwrap(), Scope::Season(2));
        assert!(matches!(
            service.scope_for(Some("4"), now),
            Err(StatsError::InvalidSeasonArgument(
                SeasonArgumentError::AfterCurrentSeason { requested: 4, current: 3 }
            ))
        ));
    }
}
