use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A line shown to players who fail the daily puzzle, scoped to one guild
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct QuoteEntry {
    pub id: Uuid,
    pub guild_id: String,
    pub quote: String,
    pub created_at: DateTime<Utc>,
}

impl QuoteEntry {
    pub fn new(guild_id: &str, quote: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            guild_id: guild_id.to_string(),
            quote: quote.to_string(),
            created_at: Utc::now(),
        }
    }
}
