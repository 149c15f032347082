use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// What the daily reminder should say
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "user_ids", rename_all = "snake_case")]
pub enum ReminderOutcome {
    /// Every known player already posted today's issue
    EveryoneDone,
    /// Nobody posted today's issue yet, so there is no one to single out
    NobodyStarted,
    /// Players that still have to post, in user id order
    Missing(Vec<String>),
}

impl fmt::Display for ReminderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderOutcome::EveryoneDone => write!(f, "Everyone has done today's angle!"),
            ReminderOutcome::NobodyStarted => {
                write!(f, "No one has tried guessing today's angle yet!")
            }
            ReminderOutcome::Missing(user_ids) => {
                write!(f, "Remember to do today's angle!")?;
                for user_id in user_ids {
                    write!(f, " <@{}>", user_id)?;
                }
                Ok(())
            }
        }
    }
}

/// Compares the known players against those who already posted today's issue
pub fn compute_reminder(known: &BTreeSet<String>, done: &BTreeSet<String>) -> ReminderOutcome {
    let missing: Vec<String> = known.difference(done).cloned().collect();

    if missing.is_empty() {
        ReminderOutcome::EveryoneDone
    } else if missing.len() == known.len() {
        ReminderOutcome::NobodyStarted
    } else {
        ReminderOutcome::Missing(missing)
    }
}
