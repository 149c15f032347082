use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::{compute_reminder, ReminderOutcome};
use crate::calendar::current_issue_number;
use crate::stats::{ResultRepository, StatsError};

/// Configuration for the reminder task
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// Channel the reminder is posted to
    pub channel_id: String,
    /// UTC hours of the day at which the reminder fires
    pub hours: Vec<u32>,
}

impl ReminderConfig {
    pub fn new(channel_id: String, hours: Vec<u32>) -> Self {
        Self { channel_id, hours }
    }
}

/// Delivers reminder text to a chat channel
#[async_trait]
pub trait ReminderNotifier: Send + Sync {
    async fn notify(&self, channel_id: &str, message: &str);
}

/// Notifier that only writes the reminder to the log
pub struct LogNotifier;

#[async_trait]
impl ReminderNotifier for LogNotifier {
    async fn notify(&self, channel_id: &str, message: &str) {
        info!(channel_id = %channel_id, message = %message, "Reminder");
    }
}

/// First scheduled instant strictly after `now`
pub fn next_fire_time(now: DateTime<Utc>, hours: &[u32]) -> Option<DateTime<Utc>> {
    let mut hours: Vec<u32> = hours.iter().copied().filter(|h| *h < 24).collect();
    hours.sort_unstable();

    let today = now.date_naive();
    [today, today + Duration::days(1)]
        .into_iter()
        .flat_map(|day| {
            hours
                .iter()
                .filter_map(move |hour| NaiveTime::from_hms_opt(*hour, 0, 0))
                .map(move |time| day.and_time(time))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
        .find(|candidate| *candidate > now)
}

/// Reminder outcome for the issue published on the day containing `now`
#[instrument(skip(repository))]
pub async fn today_outcome(
    repository: &dyn ResultRepository,
    now: DateTime<Utc>,
) -> Result<ReminderOutcome, StatsError> {
    let issue_number = current_issue_number(now);
    let known = repository.list_distinct_user_ids().await?;
    let done = repository.list_user_ids_who_completed(issue_number).await?;

    debug!(
        issue = issue_number,
        known = known.len(),
        done = done.len(),
        "Reminder computed"
    );
    Ok(compute_reminder(&known, &done))
}

/// Computes today's reminder and hands it to the notifier
#[instrument(skip(repository, notifier))]
pub async fn send_reminder(
    repository: &dyn ResultRepository,
    notifier: &dyn ReminderNotifier,
    channel_id: &str,
    now: DateTime<Utc>,
) -> Result<ReminderOutcome, StatsError> {
    let outcome = today_outcome(repository, now).await?;
    notifier
        .notify(channel_id, &outcome.to_string())
        .await;
    Ok(outcome)
}

/// Starts the background task that posts reminders at the configured hours
#[instrument(skip(repository, notifier))]
pub async fn start_reminder_task(
    repository: Arc<dyn ResultRepository>,
    notifier: Arc<dyn ReminderNotifier>,
    config: ReminderConfig,
) {
    info!(
        channel_id = %config.channel_id,
        hours = ?config.hours,
        "Starting reminder background task"
    );

    loop {
        let now = Utc::now();
        let Some(fire_at) = next_fire_time(now, &config.hours) else {
            error!("No valid reminder hours configured, stopping reminder task");
            return;
        };

        let wait = (fire_at - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        if let Err(e) = send_reminder(
            repository.as_ref(),
            notifier.as_ref(),
            &config.channel_id,
            fire_at,
        )
        .await
        {
            error!(error = %e, "Reminder task failed");
        }
    }
}
