//! The date/time engine boundary.
//!
//! Everything the library knows about dates goes through two traits:
//! [`TimeEngine`] (parsing, duration phrasing, the process-wide locale) and
//! [`Instant`] (operations on one parsed point in time). Parsing, calendar
//! rules, and locale data are the engine's problem; the filters and the live
//! label controller only orchestrate calls across this seam.
//!
//! [`ChronoEngine`] is the bundled implementation, backed by `chrono`,
//! `chrono-tz`, and `chrono-humanize`.

mod chrono;

pub use self::chrono::ChronoEngine;

use crate::value::{DurationUnit, TimeSource};

/// One parsed point in time, valid or not.
///
/// Invalid instants still answer every call: text operations return the
/// engine's fallback text and [`Instant::minutes_from_now`] returns `None`.
pub trait Instant {
    /// Whether parsing produced a usable instant.
    fn is_valid(&self) -> bool;

    /// Relative-time phrase for this instant measured from "now",
    /// e.g. "3 minutes ago" or, with `without_suffix`, "3 minutes".
    fn from_now(&self, without_suffix: bool) -> String;

    /// Elapsed whole minutes from this instant to "now", signed
    /// (positive for past instants). `None` when the instant is invalid.
    fn minutes_from_now(&self) -> Option<i64>;

    /// Calendar-style phrase: nearby days get a named form
    /// ("Today at 1:33 PM"), everything else a plain date.
    fn calendar(&self) -> String;

    /// Text for an explicit format pattern, consumed verbatim.
    fn format(&self, pattern: &str) -> String;

    /// This instant shifted into a named timezone, or `None` when the
    /// engine has no timezone conversion capability.
    fn in_timezone(&self, timezone: &str) -> Option<Box<dyn Instant>>;
}

/// A date/time engine: the single entry point the rest of the library
/// holds on to (shared as `Arc<dyn TimeEngine>`).
pub trait TimeEngine: Send + Sync {
    /// Parse a source value into an instant. `format` is an optional
    /// explicit pattern; `None` or an empty pattern mean auto-detect.
    ///
    /// Never fails: unparseable input yields an invalid instant.
    fn parse(&self, value: &TimeSource, format: Option<&str>) -> Box<dyn Instant>;

    /// Humanized text for a duration of `magnitude` in `unit`.
    /// With `with_suffix`, positive durations read "in ..." and negative
    /// ones "... ago".
    fn humanize_duration(&self, magnitude: f64, unit: DurationUnit, with_suffix: bool) -> String;

    /// The active locale code.
    fn locale(&self) -> String;

    /// Switch the process-wide locale, returning the code now in effect.
    fn set_locale(&self, code: &str) -> String;
}

#[cfg(test)]
pub(crate) mod mock {
    //! A scriptable engine for controller and service tests.

    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, RwLock};

    use super::{Instant, TimeEngine};
    use crate::value::{DurationUnit, TimeSource};

    /// Shared knobs read by every instant the mock hands out.
    pub(crate) struct MockState {
        pub valid: AtomicBool,
        pub minutes: RwLock<Option<i64>>,
        pub phrase: RwLock<String>,
        pub calendar_text: RwLock<String>,
        pub tz_capable: AtomicBool,
        pub locale: RwLock<String>,
        pub parse_calls: AtomicUsize,
        pub last_parsed: RwLock<Option<(TimeSource, Option<String>)>>,
        pub last_timezone: RwLock<Option<String>>,
    }

    impl Default for MockState {
        fn default() -> Self {
            Self {
                valid: AtomicBool::new(true),
                minutes: RwLock::new(Some(0)),
                phrase: RwLock::new("moments".to_string()),
                calendar_text: RwLock::new("Today at 1:33 PM".to_string()),
                tz_capable: AtomicBool::new(false),
                locale: RwLock::new("en".to_string()),
                parse_calls: AtomicUsize::new(0),
                last_parsed: RwLock::new(None),
                last_timezone: RwLock::new(None),
            }
        }
    }

    impl MockState {
        pub fn set_phrase(&self, phrase: &str) {
            *self.phrase.write().unwrap() = phrase.to_string();
        }

        pub fn set_minutes(&self, minutes: Option<i64>) {
            *self.minutes.write().unwrap() = minutes;
        }

        pub fn parse_calls(&self) -> usize {
            self.parse_calls.load(Ordering::Relaxed)
        }

        pub fn last_format(&self) -> Option<String> {
            self.last_parsed
                .read()
                .unwrap()
                .as_ref()
                .and_then(|(_, format)| format.clone())
        }
    }

    pub(crate) struct MockEngine {
        state: Arc<MockState>,
    }

    impl MockEngine {
        pub fn new() -> Self {
            Self {
                state: Arc::new(MockState::default()),
            }
        }

        pub fn state(&self) -> Arc<MockState> {
            Arc::clone(&self.state)
        }
    }

    struct MockInstant {
        state: Arc<MockState>,
    }

    impl TimeEngine for MockEngine {
        fn parse(&self, value: &TimeSource, format: Option<&str>) -> Box<dyn Instant> {
            self.state.parse_calls.fetch_add(1, Ordering::Relaxed);
            *self.state.last_parsed.write().unwrap() =
                Some((value.clone(), format.map(str::to_string)));
            Box::new(MockInstant {
                state: Arc::clone(&self.state),
            })
        }

        fn humanize_duration(
            &self,
            magnitude: f64,
            unit: DurationUnit,
            with_suffix: bool,
        ) -> String {
            format!("dur({magnitude},{unit:?},{with_suffix})")
        }

        fn locale(&self) -> String {
            self.state.locale.read().unwrap().clone()
        }

        fn set_locale(&self, code: &str) -> String {
            *self.state.locale.write().unwrap() = code.to_string();
            code.to_string()
        }
    }

    impl Instant for MockInstant {
        fn is_valid(&self) -> bool {
            self.state.valid.load(Ordering::Relaxed)
        }

        fn from_now(&self, without_suffix: bool) -> String {
            let phrase = self.state.phrase.read().unwrap().clone();
            if without_suffix {
                phrase
            } else {
                format!("{phrase} ago")
            }
        }

        fn minutes_from_now(&self) -> Option<i64> {
            *self.state.minutes.read().unwrap()
        }

        fn calendar(&self) -> String {
            self.state.calendar_text.read().unwrap().clone()
        }

        fn format(&self, pattern: &str) -> String {
            format!("fmt:{pattern}")
        }

        fn in_timezone(&self, timezone: &str) -> Option<Box<dyn Instant>> {
            *self.state.last_timezone.write().unwrap() = Some(timezone.to_string());
            if self.state.tz_capable.load(Ordering::Relaxed) {
                Some(Box::new(MockInstant {
                    state: Arc::clone(&self.state),
                }))
            } else {
                None
            }
        }
    }
}
