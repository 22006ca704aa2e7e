//! Post-game refresh windows on the NFL calendar.
//!
//! Results land late on game nights, so a schedule fetched before a window
//! opens must be refetched once it has opened, regardless of the TTL. Windows
//! are wall-clock times in US/Eastern.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::US::Eastern;

/// Weekly window starts in Eastern time: (weekday, hour, minute).
const WINDOW_STARTS: [(Weekday, u32, u32); 7] = [
    (Weekday::Mon, 23, 0),
    (Weekday::Thu, 23, 0),
    (Weekday::Sat, 23, 0),
    (Weekday::Sun, 16, 35),
    (Weekday::Sun, 20, 0),
    (Weekday::Sun, 23, 0),
    (Weekday::Sun, 23, 30),
];

/// Most recent window start at or before `now`.
pub fn latest_window_start(now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let local_today = now.with_timezone(&Eastern).date_naive();

    (0..=7)
        .filter_map(|days_back| local_today.checked_sub_signed(Duration::days(days_back)))
        .flat_map(|day| {
            WINDOW_STARTS
                .iter()
                .filter(move |(weekday, _, _)| day.weekday() == *weekday)
                .filter_map(move |&(_, hour, minute)| {
                    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
                    Eastern
                        .from_local_datetime(&day.and_time(time))
                        .latest()
                        .map(|dt| dt.with_timezone(&Utc))
                })
        })
        .filter(|start| *start <= now)
        .max()
}

/// Whether a window opened in `(fetched_at, now]`.
pub fn window_passed_since(fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    latest_window_start(now).is_some_and(|start| start > fetched_at)
}
