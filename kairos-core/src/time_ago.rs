//! The live "time ago" label controller.
//!
//! One [`TimeAgo`] backs one mounted label. The host feeds it every observed
//! input change and every fired timer; the controller renders relative-time
//! text and keeps itself fresh through a self-rescheduled wake-up whose
//! delay widens as the instant recedes into the past (or future).

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ConfigHandle;
use crate::engine::TimeEngine;
use crate::schedule::{Scheduler, TimerId};
use crate::value::TimeSource;

/// Refresh tiers: elapsed whole minutes (by magnitude) up to the bound map
/// to the next poll delay in seconds. First matching bound wins.
const UPDATE_TIERS: &[(u64, u64)] = &[(1, 1), (60, 30), (180, 300)];

/// Poll delay when the elapsed time exceeds every tier, or is unknown.
const SLOW_POLL_SECS: u64 = 3600;

fn poll_interval(elapsed_minutes: Option<i64>) -> Duration {
    let Some(minutes) = elapsed_minutes else {
        return Duration::from_secs(SLOW_POLL_SECS);
    };
    let magnitude = minutes.unsigned_abs();
    for &(bound, secs) in UPDATE_TIERS {
        if magnitude <= bound {
            return Duration::from_secs(secs);
        }
    }
    Duration::from_secs(SLOW_POLL_SECS)
}

/// Controller for one live relative-time label.
///
/// Holds at most one outstanding timer; every render cycle cancels the
/// previous one first. Cancels on blank source, on [`TimeAgo::unmount`],
/// and on drop.
pub struct TimeAgo {
    engine: Arc<dyn TimeEngine>,
    config: ConfigHandle,
    scheduler: Rc<dyn Scheduler>,
    source: Option<TimeSource>,
    format: Option<String>,
    suffix_override: Option<bool>,
    pending: Option<TimerId>,
    text: Option<String>,
}

impl TimeAgo {
    pub fn new(
        engine: Arc<dyn TimeEngine>,
        config: ConfigHandle,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            engine,
            config,
            scheduler,
            source: None,
            format: None,
            suffix_override: None,
            pending: None,
            text: None,
        }
    }

    /// The rendered label body: `None` before the first render (the host
    /// keeps any static content), `Some("")` after an explicit clear.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The wake-up currently outstanding, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }

    /// React to a newly observed source value.
    ///
    /// A blank value cancels the outstanding wake-up and, when something
    /// was rendered before, clears the label body; static host content is
    /// left alone otherwise.
    pub fn set_source(&mut self, value: TimeSource) {
        if value.is_blank() {
            self.cancel_pending();
            if self.source.take().is_some() {
                self.text = Some(String::new());
            }
            return;
        }
        self.source = Some(value);
        self.render_and_reschedule();
    }

    /// React to a newly observed format pattern (`None` = auto-detect).
    pub fn set_format(&mut self, format: Option<String>) {
        self.format = format;
        self.render_and_reschedule();
    }

    /// React to a newly observed suffix expression. Only a boolean
    /// overrides the process default; anything else resets the label to
    /// the default without forcing a re-render.
    pub fn set_suffix_override(&mut self, value: Option<bool>) {
        self.suffix_override = value;
        if value.is_some() {
            self.render_and_reschedule();
        }
    }

    /// React to a locale switch: re-parse and re-render the stored source.
    pub fn notify_locale_changed(&mut self) {
        self.render_and_reschedule();
    }

    /// Route one fired timer in. Stale ids (cancelled or replaced) are
    /// ignored.
    pub fn timer_fired(&mut self, id: TimerId) {
        if self.pending != Some(id) {
            return;
        }
        self.pending = None;
        self.render_and_reschedule();
    }

    /// Tear the label down, cancelling any outstanding wake-up.
    pub fn unmount(&mut self) {
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Render the stored source and schedule the next refresh. Does
    /// nothing while no source is bound.
    fn render_and_reschedule(&mut self) {
        self.cancel_pending();
        let Some(source) = &self.source else {
            return;
        };
        let instant = self.engine.parse(source, self.format.as_deref());
        let without_suffix = self
            .suffix_override
            .unwrap_or_else(|| self.config.snapshot().without_suffix);
        self.text = Some(instant.from_now(without_suffix));
        let delay = poll_interval(instant.minutes_from_now());
        tracing::trace!(?delay, "scheduled relative-time refresh");
        self.pending = Some(self.scheduler.schedule(delay));
    }
}

impl Drop for TimeAgo {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
