//! The bundled engine, backed by `chrono`, `chrono-tz`, and `chrono-humanize`.
//!
//! Times parsed without an offset are taken as UTC. Locale codes are tracked
//! (lowercase-normalized) but phrasing stays English; hosts that need
//! translated phrasing plug in their own [`TimeEngine`].

use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_humanize::{Accuracy, HumanTime, Tense};
use chrono_tz::Tz;

use super::{Instant, TimeEngine};
use crate::clock::{Clock, SystemClock};
use crate::value::{DurationUnit, TimeSource};

/// Text rendered for instants that failed to parse.
const INVALID_TEXT: &str = "Invalid date";

/// 12-hour wall-clock form used by the nearby calendar buckets.
const CLOCK_TIME: &str = "%-I:%M %p";

/// Naive datetime layouts tried by auto-detection, in order.
const DETECT_PATTERNS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Date-only layouts tried last; midnight is assumed.
const DETECT_DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// The default time engine.
pub struct ChronoEngine {
    clock: Arc<dyn Clock>,
    locale: RwLock<String>,
}

impl ChronoEngine {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Build against a specific clock (tests, simulations).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            locale: RwLock::new("en".to_string()),
        }
    }

    fn instant(&self, at: Option<DateTime<FixedOffset>>) -> Box<dyn Instant> {
        Box::new(ChronoInstant {
            at,
            clock: Arc::clone(&self.clock),
        })
    }
}

impl Default for ChronoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeEngine for ChronoEngine {
    fn parse(&self, value: &TimeSource, format: Option<&str>) -> Box<dyn Instant> {
        let at = match value {
            TimeSource::Blank => None,
            TimeSource::Timestamp(at) => Some(at.fixed_offset()),
            TimeSource::Millis(ms) => from_millis(*ms),
            TimeSource::Text(text) => parse_text(text, format.filter(|f| !f.is_empty())),
        };
        self.instant(at)
    }

    fn humanize_duration(&self, magnitude: f64, unit: DurationUnit, with_suffix: bool) -> String {
        let millis = (magnitude * unit.millis()) as i64;
        let human = HumanTime::from(TimeDelta::milliseconds(millis));
        if with_suffix {
            human.to_string()
        } else {
            human.to_text_en(Accuracy::Rough, Tense::Present)
        }
    }

    fn locale(&self) -> String {
        self.locale.read().unwrap().clone()
    }

    fn set_locale(&self, code: &str) -> String {
        let normalized = code.trim().to_ascii_lowercase();
        *self.locale.write().unwrap() = normalized.clone();
        normalized
    }
}

fn from_millis(ms: i64) -> Option<DateTime<FixedOffset>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|at| at.fixed_offset())
}

fn parse_text(text: &str, pattern: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match pattern {
        Some(pattern) => parse_with_pattern(text, pattern),
        None => detect(text),
    }
}

/// Parse with an explicit pattern, consumed verbatim. Patterns without
/// offset or time-of-day tokens fall through to the naive forms.
fn parse_with_pattern(text: &str, pattern: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(at) = DateTime::parse_from_str(text, pattern) {
        return Some(at);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(text, pattern)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Try a short list of common layouts: RFC 3339, RFC 2822, then naive forms.
fn detect(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at);
    }
    if let Ok(at) = DateTime::parse_from_rfc2822(text) {
        return Some(at);
    }
    for pattern in DETECT_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    for pattern in DETECT_DATE_PATTERNS {
        if let Ok(date) = NaiveDate::parse_from_str(text, pattern) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc().fixed_offset());
        }
    }
    None
}

/// An instant parsed by [`ChronoEngine`]; `at` is `None` when invalid.
struct ChronoInstant {
    at: Option<DateTime<FixedOffset>>,
    clock: Arc<dyn Clock>,
}

impl ChronoInstant {
    fn rebox(&self, at: Option<DateTime<FixedOffset>>) -> Box<dyn Instant> {
        Box::new(ChronoInstant {
            at,
            clock: Arc::clone(&self.clock),
        })
    }
}

impl Instant for ChronoInstant {
    fn is_valid(&self) -> bool {
        self.at.is_some()
    }

    fn from_now(&self, without_suffix: bool) -> String {
        let Some(at) = self.at else {
            return INVALID_TEXT.to_string();
        };
        let human = HumanTime::from(at.with_timezone(&Utc) - self.clock.now());
        if without_suffix {
            human.to_text_en(Accuracy::Rough, Tense::Present)
        } else {
            human.to_string()
        }
    }

    fn minutes_from_now(&self) -> Option<i64> {
        let at = self.at?;
        Some((self.clock.now() - at.with_timezone(&Utc)).num_minutes())
    }

    fn calendar(&self) -> String {
        let Some(at) = self.at else {
            return INVALID_TEXT.to_string();
        };
        let today = self.clock.now().with_timezone(at.offset()).date_naive();
        match (at.date_naive() - today).num_days() {
            0 => format!("Today at {}", at.format(CLOCK_TIME)),
            1 => format!("Tomorrow at {}", at.format(CLOCK_TIME)),
            -1 => format!("Yesterday at {}", at.format(CLOCK_TIME)),
            2..=6 => format!("{} at {}", at.format("%A"), at.format(CLOCK_TIME)),
            -6..=-2 => format!("Last {} at {}", at.format("%A"), at.format(CLOCK_TIME)),
            _ => at.format("%m/%d/%Y").to_string(),
        }
    }

    fn format(&self, pattern: &str) -> String {
        let Some(at) = self.at else {
            return INVALID_TEXT.to_string();
        };
        let mut out = String::new();
        if write!(out, "{}", at.format(pattern)).is_err() {
            tracing::debug!(pattern, "format pattern failed to render");
            return INVALID_TEXT.to_string();
        }
        out
    }

    fn in_timezone(&self, timezone: &str) -> Option<Box<dyn Instant>> {
        let Some(at) = self.at else {
            return Some(self.rebox(None));
        };
        match Tz::from_str(timezone) {
            Ok(tz) => Some(self.rebox(Some(at.with_timezone(&tz).fixed_offset()))),
            Err(_) => {
                tracing::debug!(timezone, "unknown timezone name, instant left unchanged");
                Some(self.rebox(Some(at)))
            }
        }
    }
}
