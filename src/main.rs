use anglebot::{
    config::Config,
    quotes::{InMemoryQuoteRepository, PostgresQuoteRepository, QuoteError, QuoteRepository},
    reminder::{start_reminder_task, LogNotifier, ReminderConfig},
    router,
    stats::{InMemoryResultRepository, PostgresResultRepository, ResultRepository},
    AppState, StatsError,
};
use clap::Parser;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anglebot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    info!(bind = %config.bind, "Starting angle puzzle tracker");

    let app_state = match build_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialise storage");
            std::process::exit(1);
        }
    };

    match &config.reminder_channel {
        Some(channel_id) => {
            tokio::spawn(start_reminder_task(
                Arc::clone(&app_state.result_repository),
                Arc::new(LogNotifier),
                ReminderConfig::new(channel_id.clone(), config.reminder_hours.clone()),
            ));
        }
        None => warn!("No reminder channel configured, daily reminders are disabled"),
    }

    let listener = match tokio::net::TcpListener::bind(&config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, bind = %config.bind, "Failed to bind listener");
            std::process::exit(1);
        }
    };
    info!("Gateway adapter listening on http://{}", config.bind);

    if let Err(e) = axum::serve(listener, router(app_state)).await {
        error!(error = %e, "Server stopped");
    }
}

#[derive(Debug, Error)]
enum StartupError {
    #[error("Could not connect to the database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Could not prepare the results table: {0}")]
    ResultSchema(#[from] StatsError),

    #[error("Could not prepare the quotes table: {0}")]
    QuoteSchema(#[from] QuoteError),
}

async fn build_state(config: &Config) -> Result<AppState, StartupError> {
    let Some(database_url) = &config.database_url else {
        info!("No database configured, keeping results in memory");
        let results: Arc<dyn ResultRepository> = Arc::new(InMemoryResultRepository::new());
        let quotes: Arc<dyn QuoteRepository> = Arc::new(InMemoryQuoteRepository::new());
        return Ok(AppState::new(results, quotes));
    };

    let pool = sqlx::PgPool::connect(database_url).await?;

    let results = PostgresResultRepository::new(pool.clone());
    results.ensure_schema().await?;
    let quotes = PostgresQuoteRepository::new(pool);
    quotes.ensure_schema().await?;

    info!("Connected to PostgreSQL");
    Ok(AppState::new(Arc::new(results), Arc::new(quotes)))
}
