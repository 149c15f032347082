//! Season and issue numbering derived from wall-clock time

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Issue published at [`REFERENCE_ISSUE_UNIX_TIME`] (7am GMT-5 on July 1 2025)
pub const REFERENCE_ISSUE: u32 = 1106;
pub const REFERENCE_ISSUE_UNIX_TIME: i64 = 1_751_371_200;

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// First instant of season 1
pub fn season_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Calendar-month season containing `now`; 0 before the first season starts
pub fn current_season(now: DateTime<Utc>) -> u32 {
    let epoch = season_epoch();
    if now < epoch {
        return 0;
    }

    let mut months = (now.year() - epoch.year()) * 12 + now.month() as i32 - epoch.month() as i32;
    if now.day() < epoch.day() {
        months -= 1;
    }

    u32::try_from(months + 1).unwrap_or(0)
}

/// Issue published on the day containing `now`, counted in whole 24h buckets
pub fn current_issue_number(now: DateTime<Utc>) -> u32 {
    let elapsed_days = (now.timestamp() - REFERENCE_ISSUE_UNIX_TIME).div_euclid(SECONDS_PER_DAY);
    let issue = i64::from(REFERENCE_ISSUE) + elapsed_days;
    u32::try_from(issue.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[rstest]
    #[case(utc(2025, 7, 1, 0), 1)]
    #[case(utc(2025, 7, 31, 23), 1)]
    #[case(utc(2025, 8, 1, 0), 2)]
    #[case(utc(2025, 12, 15, 12), 6)]
    #[case(utc(2026, 1, 1, 0), 7)]
    #[case(utc(2026, 2, 28, 23), 8)]
    #[case(utc(2026, 3, 1, 0), 9)]
    #[case(utc(2026, 10, 19, 9), 16)]
    fn season_follows_calendar_months(#[case] now: DateTime<Utc>, #[case] expected: u32) {
        assert_eq!(current_season(now), expected);
    }

    #[test]
    fn season_is_zero_before_epoch() {
        assert_eq!(current_season(season_epoch() - Duration::days(1)), 0);
        assert_eq!(current_season(season_epoch() - Duration::seconds(1)), 0);
    }

    #[test]
    fn one_calendar_month_after_epoch_is_season_two() {
        let later = season_epoch()
            .checked_add_months(chrono::Months::new(1))
            .unwrap();
        assert_eq!(current_season(later), 2);
    }

    #[rstest]
    #[case(0, REFERENCE_ISSUE)]
    #[case(SECONDS_PER_DAY - 1, REFERENCE_ISSUE)]
    #[case(SECONDS_PER_DAY, REFERENCE_ISSUE + 1)]
    #[case(30 * SECONDS_PER_DAY + 5, REFERENCE_ISSUE + 30)]
    #[case(-1, REFERENCE_ISSUE - 1)]
    fn issue_advances_every_day(#[case] offset_secs: i64, #[case] expected: u32) {
        let now = DateTime::from_timestamp(REFERENCE_ISSUE_UNIX_TIME + offset_secs, 0).unwrap();
        assert_eq!(current_issue_number(now), expected);
    }
}
