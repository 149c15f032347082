// Library crate for the angle puzzle tracker
// This file exposes the public API for integration tests

pub mod bot;
pub mod calendar;
pub mod config;
pub mod quotes;
pub mod reminder;
pub mod report;
pub mod shared;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

// Re-export commonly used types for easier access in tests
pub use bot::{BotReply, BotService, ChatUser, InboundMessage};
pub use report::{parse_report, AngleResult, Attempt, ReportError};
pub use shared::{AppError, AppState, Clock, FixedClock, SystemClock};
pub use stats::{compute_standings, compute_stats, PlayerStats, Scope, Standing, StatsError};

/// Routes of the chat gateway adapter
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "anglebot is running" }))
        .route("/messages", post(bot::handle_message))
        .route("/reminder", get(bot::preview_reminder))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
