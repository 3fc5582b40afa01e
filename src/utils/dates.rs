//! Date and time utilities

use chrono::{DateTime, Local, Utc};

/// Display format shared by release and saved dates
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format an ISO-8601 timestamp (e.g. "2012-06-05T07:00:00Z") as "YYYY-MM-DD".
///
/// Returns an empty string when the input is missing or unparseable.
pub fn format_release_date(raw: Option<&str>) -> String {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format(DISPLAY_DATE_FORMAT)
                .to_string()
        })
        .unwrap_or_default()
}

/// Format a save timestamp as a local "YYYY-MM-DD"
pub fn format_saved_date(saved_at: DateTime<Utc>) -> String {
    saved_at
        .with_timezone(&Local)
        .format(DISPLAY_DATE_FORMAT)
        .to_string()
}

/// Convert a timestamp to nanoseconds since the Unix epoch
pub fn to_nanos(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_nanos_opt().unwrap_or(i64::MAX)
}

/// Inverse of [`to_nanos`]
pub fn from_nanos(nanos: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_release_date() {
        assert_eq!(
            format_release_date(Some("2012-06-05T07:00:00Z")),
            "2012-06-05"
        );
        assert_eq!(
            format_release_date(Some("1959-08-17T12:00:00-07:00")),
            "1959-08-17"
        );
    }

    #[test]
    fn test_format_release_date_missing_or_garbage() {
        assert_eq!(format_release_date(None), "");
        assert_eq!(format_release_date(Some("")), "");
        assert_eq!(format_release_date(Some("last tuesday")), "");
    }

    #[test]
    fn test_nanos_round_trip_is_exact() {
        let dt = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(from_nanos(to_nanos(dt)), dt);
    }

    #[test]
    fn test_format_saved_date_shape() {
        let formatted = format_saved_date(Utc::now());
        assert_eq!(formatted.len(), 10);
        assert_eq!(formatted.as_bytes()[4], b'-');
        assert_eq!(formatted.as_bytes()[7], b'-');
    }
}
