//! Timestamp and calendar-date utilities

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{Error, Result};

/// Format accepted for calendar dates in queries and fixtures
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, CALENDAR_DATE_FORMAT).map_err(|e| {
        Error::InvalidInput(format!("invalid date '{}' (expected YYYY-MM-DD): {}", raw, e))
    })
}

/// Drop the time of day, keeping the calendar date
pub fn calendar_date(timestamp: NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_parse_calendar_date_valid() {
        let date = parse_calendar_date("2024-02-29").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        assert!(matches!(parse_calendar_date("2023-02-29"), Err(Error::InvalidInput(_))));
        assert!(parse_calendar_date("29/02/2024").is_err());
        assert!(parse_calendar_date("").is_err());
    }

    #[test]
    fn test_calendar_date_ignores_time_of_day() {
        let late = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(calendar_date(late), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }
}
