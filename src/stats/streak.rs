use crate::report::AngleResult;

use super::{PlayerStats, StatsError};

/// Aggregates one player's history into win rate and streaks.
///
/// `results` must be ordered by issue number, most recent first. The current
/// streak is frozen at the first break met while walking back from the most
/// recent result; the max streak keeps updating across the whole history.
pub fn compute_stats(results: &[AngleResult]) -> Result<PlayerStats, StatsError> {
    let (first, rest) = results.split_first().ok_or(StatsError::NoDataAvailable)?;

    let mut wins = 0u32;
    let mut streak = 0u32;
    let mut max_streak = 0u32;
    let mut current_streak: Option<u32> = None;

    if first.is_completed() {
        wins = 1;
        streak = 1;
        max_streak = 1;
    } else {
        current_streak = Some(0);
    }

    let mut last_issue = first.issue_number;
    for result in rest {
        if result.is_completed() {
            wins += 1;
            if result.issue_number.checked_add(1) == Some(last_issue) {
                streak += 1;
            } else {
                current_streak.get_or_insert(streak);
                streak = 1;
            }
            max_streak = max_streak.max(streak);
        } else {
            current_streak.get_or_insert(streak);
            streak = 0;
        }
        last_issue = result.issue_number;
    }

    Ok(PlayerStats {
        played: results.len() as u32,
        wins,
        current_streak: current_streak.unwrap_or(streak),
        max_streak,
    })
}

/// Results solved on the first guess
pub fn count_one_guess(results: &[AngleResult]) -> u32 {
    results
        .iter()
        .filter(|result| result.is_completed() && result.try_count() == 1)
        .count() as u32
}
