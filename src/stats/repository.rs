use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{Scope, StatsError};
use crate::report::{AngleResult, Attempt};

/// Storage of reported results
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn insert_result(&self, result: &AngleResult) -> Result<(), StatsError>;

    /// Results of one player, most recent issue first
    async fn list_results_for_user(
        &self,
        user_id: &str,
        scope: Scope,
    ) -> Result<Vec<AngleResult>, StatsError>;

    async fn list_results_for_season(&self, season: u32) -> Result<Vec<AngleResult>, StatsError>;
    async fn list_all_results(&self) -> Result<Vec<AngleResult>, StatsError>;
    async fn list_distinct_user_ids(&self) -> Result<BTreeSet<String>, StatsError>;

    /// Players who posted a result for the issue, solved or not
    async fn list_user_ids_who_completed(
        &self,
        issue_number: u32,
    ) -> Result<BTreeSet<String>, StatsError>;
}

/// In-memory implementation of ResultRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryResultRepository {
    results: Arc<RwLock<Vec<AngleResult>>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_results(results: Vec<AngleResult>) -> Self {
        Self {
            results: Arc::new(RwLock::new(results)),
        }
    }

    pub async fn result_count(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    #[instrument(skip(self, result))]
    async fn insert_result(&self, result: &AngleResult) -> Result<(), StatsError> {
        debug!(user_id = %result.user_id, issue = result.issue_number, "Storing result in memory");
        self.results.write().await.push(result.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_results_for_user(
        &self,
        user_id: &str,
        scope: Scope,
    ) -> Result<Vec<AngleResult>, StatsError> {
        let results = self.results.read().await;
        let mut selected: Vec<AngleResult> = results
            .iter()
            .filter(|r| r.user_id == user_id && scope.includes(r.season))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.issue_number.cmp(&a.issue_number));
        Ok(selected)
    }

    #[instrument(skip(self))]
    async fn list_results_for_season(&self, season: u32) -> Result<Vec<AngleResult>, StatsError> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .filter(|r| r.season == season)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_all_results(&self) -> Result<Vec<AngleResult>, StatsError> {
        Ok(self.results.read().await.clone())
    }

    #[instrument(skip(self))]
    async fn list_distinct_user_ids(&self) -> Result<BTreeSet<String>, StatsError> {
        let results = self.results.read().await;
        Ok(results.iter().map(|r| r.user_id.clone()).collect())
    }

    #[instrument(skip(self))]
    async fn list_user_ids_who_completed(
        &self,
        issue_number: u32,
    ) -> Result<BTreeSet<String>, StatsError> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .filter(|r| r.issue_number == issue_number)
            .map(|r| r.user_id.clone())
            .collect())
    }
}

/// PostgreSQL implementation of result repository
pub struct PostgresResultRepository {
    pool: PgPool,
}

const RESULT_COLUMNS: &str =
    "user_id, display_name, issue_number, tries, miss_degrees, completed, season";

impl PostgresResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), StatsError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS angle_results (
                id UUID PRIMARY KEY,
                user_id TEXT NOT NULL,
                display_name TEXT NOT NULL,
                issue_number INTEGER NOT NULL,
                tries INTEGER NOT NULL,
                miss_degrees INTEGER NOT NULL,
                completed BOOLEAN NOT NULL,
                season INTEGER NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        debug!("angle_results table ready");
        Ok(())
    }

    async fn fetch_results(
        &self,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<Vec<AngleResult>, StatsError> {
        let rows = query.fetch_all(&self.pool).await.map_err(database_error)?;
        rows.iter().map(row_to_result).collect()
    }
}

#[async_trait]
impl ResultRepository for PostgresResultRepository {
    #[instrument(skip(self, result))]
    async fn insert_result(&self, result: &AngleResult) -> Result<(), StatsError> {
        debug!(user_id = %result.user_id, issue = result.issue_number, "Storing result in database");

        let (tries, completed) = result.attempt.to_legacy();
        sqlx::query(
            "INSERT INTO angle_results (id, user_id, display_name, issue_number, tries, miss_degrees, completed, season, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(Uuid::new_v4())
        .bind(&result.user_id)
        .bind(&result.display_name)
        .bind(to_column(result.issue_number)?)
        .bind(tries)
        .bind(to_column(result.miss_degrees)?)
        .bind(completed)
        .bind(to_column(result.season)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_results_for_user(
        &self,
        user_id: &str,
        scope: Scope,
    ) -> Result<Vec<AngleResult>, StatsError> {
        match scope {
            Scope::Season(season) => {
                let sql = format!(
                    "SELECT {RESULT_COLUMNS} FROM angle_results WHERE user_id = $1 AND season = $2 ORDER BY issue_number DESC"
                );
                self.fetch_results(sqlx::query(&sql).bind(user_id).bind(to_column(season)?))
                    .await
            }
            Scope::All => {
                let sql = format!(
                    "SELECT {RESULT_COLUMNS} FROM angle_results WHERE user_id = $1 ORDER BY issue_number DESC"
                );
                self.fetch_results(sqlx::query(&sql).bind(user_id)).await
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_results_for_season(&self, season: u32) -> Result<Vec<AngleResult>, StatsError> {
        let sql = format!(
            "SELECT {RESULT_COLUMNS} FROM angle_results WHERE season = $1 ORDER BY created_at, id"
        );
        self.fetch_results(sqlx::query(&sql).bind(to_column(season)?))
            .await
    }

    #[instrument(skip(self))]
    async fn list_all_results(&self) -> Result<Vec<AngleResult>, StatsError> {
        let sql = format!("SELECT {RESULT_COLUMNS} FROM angle_results ORDER BY created_at, id");
        self.fetch_results(sqlx::query(&sql)).await
    }

    #[instrument(skip(self))]
    async fn list_distinct_user_ids(&self) -> Result<BTreeSet<String>, StatsError> {
        let rows = sqlx::query("SELECT DISTINCT user_id FROM angle_results")
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("user_id").map_err(database_error))
            .collect()
    }

    #[instrument(skip(self))]
    async fn list_user_ids_who_completed(
        &self,
        issue_number: u32,
    ) -> Result<BTreeSet<String>, StatsError> {
        let rows = sqlx::query("SELECT DISTINCT user_id FROM angle_results WHERE issue_number = $1")
            .bind(to_column(issue_number)?)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("user_id").map_err(database_error))
            .collect()
    }
}

fn database_error(e: sqlx::Error) -> StatsError {
    warn!(error = %e, "Result repository query failed");
    StatsError::Repository(e.to_string())
}

fn to_column(value: u32) -> Result<i32, StatsError> {
    i32::try_from(value)
        .map_err(|_| StatsError::Repository(format!("{} does not fit an INTEGER column", value)))
}

fn from_column(row: &PgRow, column: &str) -> Result<u32, StatsError> {
    let value: i32 = row.try_get(column).map_err(database_error)?;
    u32::try_from(value)
        .map_err(|_| StatsError::Repository(format!("negative {} in stored result", column)))
}

fn row_to_result(row: &PgRow) -> Result<AngleResult, StatsError> {
    let tries: i32 = row.try_get("tries").map_err(database_error)?;
    let completed: bool = row.try_get("completed").map_err(database_error)?;
    let attempt = Attempt::from_legacy(tries, completed).ok_or_else(|| {
        StatsError::Repository(format!(
            "stored attempt (tries={}, completed={}) is invalid",
            tries, completed
        ))
    })?;

    Ok(AngleResult {
        user_id: row.try_get("user_id").map_err(database_error)?,
        display_name: row.try_get("display_name").map_err(database_error)?,
        issue_number: from_column(row, "issue_number")?,
        attempt,
        miss_degrees: from_column(row, "miss_degrees")?,
        season: from_column(row, "season")?,
    })
}
