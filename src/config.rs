//! Command-line and environment configuration

use clap::Parser;

/// Daily angle puzzle tracker
#[derive(Debug, Clone, Parser)]
#[command(name = "anglebot")]
#[command(about = "Tracks daily angle puzzle score cards posted in chat", long_about = None)]
pub struct Config {
    /// PostgreSQL connection string; results are kept in memory when absent
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address the gateway adapter listens on
    #[arg(long, env = "ANGLEBOT_BIND", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// Channel that receives the daily reminder; reminders are off when absent
    #[arg(long, env = "ANGLEBOT_REMINDER_CHANNEL")]
    pub reminder_channel: Option<String>,

    /// UTC hours at which the reminder fires
    #[arg(
        long,
        env = "ANGLEBOT_REMINDER_HOURS",
        value_delimiter = ',',
        default_value = "8,12,16,20",
        value_parser = clap::value_parser!(u32).range(0..24)
    )]
    pub reminder_hours: Vec<u32>,
}
