use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::quotes::{QuoteError, QuoteRepository};
use crate::stats::{ResultRepository, StatsError};

/// Source of the current time for request handlers
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for replaying a given day
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub result_repository: Arc<dyn ResultRepository>,
    pub quote_repository: Arc<dyn QuoteRepository>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        result_repository: Arc<dyn ResultRepository>,
        quote_repository: Arc<dyn QuoteRepository>,
    ) -> Self {
        Self {
            result_repository,
            quote_repository,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<StatsError> for AppError {
    fn from(error: StatsError) -> Self {
        match error {
            StatsError::Repository(msg) => AppError::DatabaseError(msg),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl From<QuoteError> for AppError {
    fn from(error: QuoteError) -> Self {
        match error {
            QuoteError::Repository(msg) => AppError::DatabaseError(msg),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::quotes::InMemoryQuoteRepository;
    use crate::stats::InMemoryResultRepository;

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        result_repository: Option<Arc<dyn ResultRepository>>,
        quote_repository: Option<Arc<dyn QuoteRepository>>,
        clock: Option<Arc<dyn Clock>>,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                result_repository: None,
                quote_repository: None,
                clock: None,
            }
        }

        pub fn with_result_repository(mut self, repo: Arc<dyn ResultRepository>) -> Self {
            self.result_repository = Some(repo);
            self
        }

        #[allow(dead_code)] // Available for handler tests that seed quotes
        pub fn with_quote_repository(mut self, repo: Arc<dyn QuoteRepository>) -> Self {
            self.quote_repository = Some(repo);
            self
        }

        pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
            self.clock = Some(clock);
            self
        }

        pub fn build(self) -> AppState {
            AppState {
                result_repository: self
                    .result_repository
                    .unwrap_or_else(|| Arc::new(InMemoryResultRepository::new())),
                quote_repository: self
                    .quote_repository
                    .unwrap_or_else(|| Arc::new(InMemoryQuoteRepository::new())),
                clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            }
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
