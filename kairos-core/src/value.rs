//! Input values accepted by the filters and the live label controller.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A value bound as "the instant to display".
///
/// `Blank` and the empty string are the only values that suppress rendering.
/// Everything else counts as present even if it later turns out to be
/// unparseable; the engine's invalid-instant fallback governs that case.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSource {
    /// Nothing bound (unset or explicit null).
    Blank,
    /// A formatted date/time string.
    Text(String),
    /// Epoch milliseconds.
    Millis(i64),
    /// A native timestamp.
    Timestamp(DateTime<Utc>),
}

impl TimeSource {
    /// True for the values that suppress rendering entirely.
    pub fn is_blank(&self) -> bool {
        match self {
            TimeSource::Blank => true,
            TimeSource::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Reinterpret this value as epoch milliseconds when it is numeric.
    ///
    /// A string qualifies only when the whole trimmed text parses as a
    /// finite float; the result is truncated toward zero. Native timestamps
    /// are never re-coerced.
    pub fn coerce_millis(&self) -> Option<i64> {
        match self {
            TimeSource::Millis(ms) => Some(*ms),
            TimeSource::Text(text) => parse_finite(text).map(|v| v.trunc() as i64),
            _ => None,
        }
    }
}

impl Default for TimeSource {
    fn default() -> Self {
        TimeSource::Blank
    }
}

impl fmt::Display for TimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSource::Blank => Ok(()),
            TimeSource::Text(text) => f.write_str(text),
            TimeSource::Millis(ms) => write!(f, "{ms}"),
            TimeSource::Timestamp(at) => f.write_str(&at.to_rfc3339()),
        }
    }
}

impl From<&str> for TimeSource {
    fn from(value: &str) -> Self {
        TimeSource::Text(value.to_string())
    }
}

impl From<String> for TimeSource {
    fn from(value: String) -> Self {
        TimeSource::Text(value)
    }
}

impl From<i64> for TimeSource {
    fn from(value: i64) -> Self {
        TimeSource::Millis(value)
    }
}

impl From<f64> for TimeSource {
    fn from(value: f64) -> Self {
        TimeSource::Millis(value.trunc() as i64)
    }
}

impl From<DateTime<Utc>> for TimeSource {
    fn from(value: DateTime<Utc>) -> Self {
        TimeSource::Timestamp(value)
    }
}

/// Parse text as a finite float, ignoring surrounding whitespace.
///
/// Infinities, NaN, and partially-numeric text all fail.
pub fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Units accepted by the duration filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl DurationUnit {
    /// Milliseconds per unit. Months weigh 30 days, years 365.
    pub fn millis(&self) -> f64 {
        match self {
            DurationUnit::Milliseconds => 1.0,
            DurationUnit::Seconds => 1_000.0,
            DurationUnit::Minutes => 60_000.0,
            DurationUnit::Hours => 3_600_000.0,
            DurationUnit::Days => 86_400_000.0,
            DurationUnit::Weeks => 604_800_000.0,
            DurationUnit::Months => 2_592_000_000.0,
            DurationUnit::Years => 31_536_000_000.0,
        }
    }
}

/// Error for unit names the duration filter does not recognize.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown duration unit: {0}")]
pub struct UnknownUnit(pub String);

impl FromStr for DurationUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "millisecond" | "milliseconds" | "ms" => Ok(DurationUnit::Milliseconds),
            "second" | "seconds" | "s" => Ok(DurationUnit::Seconds),
            "minute" | "minutes" | "m" => Ok(DurationUnit::Minutes),
            "hour" | "hours" | "h" => Ok(DurationUnit::Hours),
            "day" | "days" | "d" => Ok(DurationUnit::Days),
            "week" | "weeks" | "w" => Ok(DurationUnit::Weeks),
            "month" | "months" => Ok(DurationUnit::Months),
            "year" | "years" | "y" => Ok(DurationUnit::Years),
            other => Err(UnknownUnit(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_blank_values() {
        assert!(TimeSource::Blank.is_blank());
        assert!(TimeSource::from("").is_blank());
        assert!(!TimeSource::from(" ").is_blank());
        assert!(!TimeSource::from(0i64).is_blank());
        assert!(!TimeSource::from("2012-01-22").is_blank());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(TimeSource::from(1234i64).coerce_millis(), Some(1234));
        assert_eq!(TimeSource::from("1234").coerce_millis(), Some(1234));
        assert_eq!(TimeSource::from(" 12.9 ").coerce_millis(), Some(12));
        assert_eq!(TimeSource::from("-45.1").coerce_millis(), Some(-45));
        assert_eq!(TimeSource::from("12e2").coerce_millis(), Some(1200));
    }

    #[test]
    fn test_non_numeric_text_is_not_coerced() {
        assert_eq!(TimeSource::from("abc").coerce_millis(), None);
        assert_eq!(TimeSource::from("12abc").coerce_millis(), None);
        assert_eq!(TimeSource::from("inf").coerce_millis(), None);
        assert_eq!(TimeSource::from("NaN").coerce_millis(), None);
        assert_eq!(TimeSource::from("0x10").coerce_millis(), None);
        assert_eq!(TimeSource::Blank.coerce_millis(), None);
    }

    #[test]
    fn test_timestamps_are_never_coerced() {
        let ts = Utc.with_ymd_and_hms(2012, 3, 25, 1, 33, 0).unwrap();
        assert_eq!(TimeSource::from(ts).coerce_millis(), None);
    }

    #[test]
    fn test_float_source_truncates() {
        assert_eq!(TimeSource::from(99.7f64), TimeSource::Millis(99));
    }

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite("3.5"), Some(3.5));
        assert_eq!(parse_finite("  -2 "), Some(-2.0));
        assert_eq!(parse_finite("1e400"), None);
        assert_eq!(parse_finite(""), None);
    }

    #[test]
    fn test_unit_names() {
        assert_eq!("minutes".parse::<DurationUnit>(), Ok(DurationUnit::Minutes));
        assert_eq!("Minute".parse::<DurationUnit>(), Ok(DurationUnit::Minutes));
        assert_eq!("h".parse::<DurationUnit>(), Ok(DurationUnit::Hours));
        assert_eq!("years".parse::<DurationUnit>(), Ok(DurationUnit::Years));
        assert!("fortnight".parse::<DurationUnit>().is_err());
    }

    #[test]
    fn test_unit_weights() {
        assert_eq!(DurationUnit::Seconds.millis(), 1_000.0);
        assert_eq!(DurationUnit::Days.millis(), 86_400_000.0);
        assert_eq!(DurationUnit::Months.millis(), 30.0 * 86_400_000.0);
    }
}
