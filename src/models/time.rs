//! Wall-clock time-of-day helpers.
//!
//! All schedule arithmetic is done in whole minutes since midnight of the
//! entry's calendar day. No timezone offset is ever applied.

use chrono::{NaiveTime, Timelike};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes since midnight (seconds are truncated).
#[inline]
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Converts minutes since midnight to a time-of-day.
///
/// Returns `None` for values at or past midnight of the next day.
pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    if minutes >= MINUTES_PER_DAY {
        return None;
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Formats minutes since midnight as `HH:MM`.
///
/// Values past the end of the day wrap onto the next day's clock face,
/// matching what an operator sees on a wall clock.
pub fn format_minutes(minutes: u32) -> String {
    let wrapped = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Parses `HH:MM` or `HH:MM:SS`. Seconds are dropped.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()?;
    time_from_minutes(minute_of_day(time))
}

/// Formats a window bound as `HH:MM` without wrapping, so the end of the
/// day reads `24:00`.
pub fn format_window_bound(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Serde adapter for `HH:MM` time-of-day fields.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid time of day '{raw}', expected HH:MM")))
    }

    /// Same as the parent module, for optional fields.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.serialize_some(&t.format("%H:%M").to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                None => Ok(None),
                Some(s) if s.trim().is_empty() => Ok(None),
                Some(s) => crate::models::time::parse_time(&s).map(Some).ok_or_else(|| {
                    de::Error::custom(format!("invalid time of day '{s}', expected HH:MM"))
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_of_day() {
        let t = NaiveTime::from_hms_opt(10, 30, 45).unwrap();
        assert_eq!(minute_of_day(t), 630);
    }

    #[test]
    fn test_time_from_minutes() {
        assert_eq!(time_from_minutes(630), NaiveTime::from_hms_opt(10, 30, 0));
        assert_eq!(time_from_minutes(1439), NaiveTime::from_hms_opt(23, 59, 0));
        assert!(time_from_minutes(1440).is_none());
    }

    #[test]
    fn test_format_minutes_wraps_past_midnight() {
        assert_eq!(format_minutes(600), "10:00");
        assert_eq!(format_minutes(690), "11:30");
        assert_eq!(format_minutes(1470), "00:30");
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("09:15"), NaiveTime::from_hms_opt(9, 15, 0));
        assert_eq!(parse_time(" 09:15:00 "), NaiveTime::from_hms_opt(9, 15, 0));
        assert!(parse_time("25:00").is_none());
        assert!(parse_time("noon").is_none());
    }

    #[test]
    fn test_parse_time_drops_seconds() {
        assert_eq!(parse_time("10:00:59"), NaiveTime::from_hms_opt(10, 0, 0));
        assert_eq!(parse_time("23:59:30"), NaiveTime::from_hms_opt(23, 59, 0));
        assert!(parse_time("10:00:30") < parse_time("10:01"));
    }

    #[test]
    fn test_format_window_bound() {
        assert_eq!(format_window_bound(480), "08:00");
        assert_eq!(format_window_bound(1440), "24:00");
    }
}
