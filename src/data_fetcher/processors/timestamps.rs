use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Minute-precision and second-precision forms the site API uses with a
/// trailing `Z` (e.g. `2024-09-09T00:20Z`), which RFC 3339 parsing rejects.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 kickoff time into UTC.
///
/// Accepts full RFC 3339, UTC timestamps without seconds, naive timestamps
/// (treated as UTC) and bare dates (midnight UTC). Returns `None` for
/// anything else so callers can drop the record from candidate pools.
///
/// # Examples
///
/// ```
/// use honolulu_flu::data_fetcher::processors::parse_timestamp;
///
/// let kickoff = parse_timestamp("2024-09-09T00:20Z").unwrap();
/// assert_eq!(kickoff.to_rfc3339(), "2024-09-09T00:20:00+00:00");
/// assert!(parse_timestamp("TBD").is_none());
/// ```
pub fn parse_timestamp(date: &str) -> Option<DateTime<Utc>> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = date.strip_suffix('Z').unwrap_or(date);
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(naive, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_with_offset() {
        let parsed = parse_timestamp("2024-09-08T13:00:00-04:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-09-08T17:00:00+00:00");
    }

    #[test]
    fn test_minute_precision_utc() {
        let parsed = parse_timestamp("2025-01-19T20:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-01-19T20:00:00+00:00");
    }

    #[test]
    fn test_naive_and_date_only() {
        assert!(parse_timestamp("2024-10-06T17:00:00").is_some());
        let date_only = parse_timestamp("2024-10-06").unwrap();
        assert_eq!(date_only.to_rfc3339(), "2024-10-06T00:00:00+00:00");
    }

    #[test]
    fn test_unparsable_values() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("next sunday").is_none());
        assert!(parse_timestamp("2024-13-40T00:00Z").is_none());
    }
}
