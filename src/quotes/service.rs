use rand::seq::IndexedRandom;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{QuoteEntry, QuoteError, QuoteRepository};

pub struct QuoteService {
    repository: Arc<dyn QuoteRepository>,
}

impl QuoteService {
    pub fn new(repository: Arc<dyn QuoteRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, guild_id: &str) -> Result<Vec<QuoteEntry>, QuoteError> {
        self.repository.list_quotes(guild_id).await
    }

    #[instrument(skip(self, quote))]
    pub async fn add(&self, guild_id: &str, quote: &str) -> Result<QuoteEntry, QuoteError> {
        let entry = QuoteEntry::new(guild_id, quote);
        self.repository.insert_quote(&entry).await?;
        info!(quote_id = %entry.id, "Fail quote added");
        Ok(entry)
    }

    /// Removes the quote at a 1-based position of [`QuoteService::list`]
    #[instrument(skip(self))]
    pub async fn remove_at(&self, guild_id: &str, position: i64) -> Result<QuoteEntry, QuoteError> {
        let quotes = self.repository.list_quotes(guild_id).await?;
        let invalid = || QuoteError::InvalidPosition {
            position,
            len: quotes.len(),
        };

        let entry = position
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| quotes.get(index))
            .cloned()
            .ok_or_else(invalid)?;

        if !self.repository.remove_quote(guild_id, entry.id).await? {
            return Err(invalid());
        }

        info!(quote_id = %entry.id, "Fail quote removed");
        Ok(entry)
    }

    pub async fn random_quote(&self, guild_id: &str) -> Result<Option<QuoteEntry>, QuoteError> {
        let quotes = self.repository.list_quotes(guild_id).await?;
        Ok(quotes.choose(&mut rand::rng()).cloned())
    }
}
