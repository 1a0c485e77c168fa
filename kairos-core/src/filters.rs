//! Template-style date filters: calendar text, explicit patterns, durations.
//!
//! All three are pure and synchronous. Blank or unparseable input renders
//! as `""`, never an error. The instant filters read the global timezone
//! fresh from the config handle on every call.

use std::sync::Arc;

use crate::config::ConfigHandle;
use crate::engine::{Instant, TimeEngine};
use crate::timezone::apply_timezone;
use crate::value::{DurationUnit, TimeSource};

/// The three display filters.
#[derive(Clone)]
pub struct Filters {
    engine: Arc<dyn TimeEngine>,
    config: ConfigHandle,
}

impl Filters {
    pub fn new(engine: Arc<dyn TimeEngine>, config: ConfigHandle) -> Self {
        Self { engine, config }
    }

    /// Calendar-style text ("Today at 1:33 PM"; a plain date further out).
    pub fn calendar(&self, value: &TimeSource) -> String {
        self.render(value, |instant| instant.calendar())
    }

    /// Text for an explicit format pattern, consumed verbatim.
    pub fn date_format(&self, value: &TimeSource, pattern: &str) -> String {
        self.render(value, |instant| instant.format(pattern))
    }

    /// Humanized duration of `magnitude` in `unit`; `""` when no magnitude
    /// is bound. With `with_suffix`, signs read as "in ..." / "... ago".
    pub fn duration(
        &self,
        magnitude: Option<f64>,
        unit: DurationUnit,
        with_suffix: bool,
    ) -> String {
        match magnitude {
            Some(magnitude) => self.engine.humanize_duration(magnitude, unit, with_suffix),
            None => String::new(),
        }
    }

    /// Shared guard / numeric-coercion / timezone pipeline for the
    /// instant-based filters.
    fn render<F>(&self, value: &TimeSource, display: F) -> String
    where
        F: FnOnce(&dyn Instant) -> String,
    {
        if value.is_blank() {
            return String::new();
        }
        let coerced = value.coerce_millis().map(TimeSource::Millis);
        let value = coerced.as_ref().unwrap_or(value);
        let instant = self.engine.parse(value, None);
        if !instant.is_valid() {
            return String::new();
        }
        let timezone = self.config.snapshot().timezone;
        let instant = apply_timezone(instant, &timezone);
        display(instant.as_ref())
    }
}
