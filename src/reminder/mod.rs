// Public API - what other modules can use
pub use message::{compute_reminder, ReminderOutcome};
pub use task::{
    next_fire_time, send_reminder, start_reminder_task, today_outcome, LogNotifier,
    ReminderConfig, ReminderNotifier,
};

// Internal modules
mod message;
mod task;
