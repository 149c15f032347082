use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{QuoteEntry, QuoteError};

/// Per-guild ordered list of fail quotes
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Quotes of a guild in insertion order
    async fn list_quotes(&self, guild_id: &str) -> Result<Vec<QuoteEntry>, QuoteError>;
    async fn insert_quote(&self, quote: &QuoteEntry) -> Result<(), QuoteError>;
    /// Returns false when no quote with that id exists in the guild
    async fn remove_quote(&self, guild_id: &str, quote_id: Uuid) -> Result<bool, QuoteError>;
}

/// In-memory implementation of QuoteRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryQuoteRepository {
    guilds: Arc<RwLock<HashMap<String, Vec<QuoteEntry>>>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self {
            guilds: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    #[instrument(skip(self))]
    async fn list_quotes(&self, guild_id: &str) -> Result<Vec<QuoteEntry>, QuoteError> {
        let guilds = self.guilds.read().await;
        Ok(guilds.get(guild_id).cloned().unwrap_or_default())
    }

    #[instrument(skip(self, quote), fields(guild_id = %quote.guild_id))]
    async fn insert_quote(&self, quote: &QuoteEntry) -> Result<(), QuoteError> {
        let mut guilds = self.guilds.write().await;
        guilds
            .entry(quote.guild_id.clone())
            .or_default()
            .push(quote.clone());
        debug!(quote_id = %quote.id, "Quote stored in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_quote(&self, guild_id: &str, quote_id: Uuid) -> Result<bool, QuoteError> {
        let mut guilds = self.guilds.write().await;
        let Some(quotes) = guilds.get_mut(guild_id) else {
            return Ok(false);
        };
        let before = quotes.len();
        quotes.retain(|q| q.id != quote_id);
        Ok(quotes.len() < before)
    }
}

/// PostgreSQL implementation of quote repository
pub struct PostgresQuoteRepository {
    pool: PgPool,
}

impl PostgresQuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), QuoteError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS fail_quotes (
                id UUID PRIMARY KEY,
                guild_id TEXT NOT NULL,
                quote TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        debug!("fail_quotes table ready");
        Ok(())
    }
}

#[async_trait]
impl QuoteRepository for PostgresQuoteRepository {
    #[instrument(skip(self))]
    async fn list_quotes(&self, guild_id: &str) -> Result<Vec<QuoteEntry>, QuoteError> {
        sqlx::query_as::<_, QuoteEntry>(
            "SELECT id, guild_id, quote, created_at FROM fail_quotes WHERE guild_id = $1 ORDER BY created_at, id",
        )
        .bind(guild_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }

    #[instrument(skip(self, quote), fields(guild_id = %quote.guild_id))]
    async fn insert_quote(&self, quote: &QuoteEntry) -> Result<(), QuoteError> {
        sqlx::query(
            "INSERT INTO fail_quotes (id, guild_id, quote, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(quote.id)
        .bind(&quote.guild_id)
        .bind(&quote.quote)
        .bind(quote.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        debug!(quote_id = %quote.id, "Quote stored in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_quote(&self, guild_id: &str, quote_id: Uuid) -> Result<bool, QuoteError> {
        let outcome = sqlx::query("DELETE FROM fail_quotes WHERE id = $1 AND guild_id = $2")
            .bind(quote_id)
            .bind(guild_id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(outcome.rows_affected() > 0)
    }
}

fn database_error(e: sqlx::Error) -> QuoteError {
    warn!(error = %e, "Quote repository query failed");
    QuoteError::Repository(e.to_string())
}
