//! # kairos-core
//!
//! Live relative-time display toolkit: a thin layer that binds a date/time
//! engine to a host UI's render loop.
//!
//! This library provides:
//! - Template-style filters for calendar text, explicit patterns, and
//!   humanized durations
//! - A self-rescheduling "time ago" label controller that re-renders on
//!   data changes, locale switches, and its own widening timer
//! - A locale switch service with change broadcast
//! - Configuration and logging infrastructure
//!
//! ## Architecture
//!
//! The host owns the event loop; the library owns none of it. Three seams
//! keep it that way:
//! - **Engine** ([`TimeEngine`]/[`Instant`]): parsing, calendar rules, and
//!   phrasing live behind a trait; [`ChronoEngine`] is the bundled
//!   implementation
//! - **Scheduler** ([`Scheduler`]): labels ask for one wake-up at a time
//!   and the host routes fired timers back in
//! - **Config** ([`ConfigHandle`]): display defaults are read fresh on
//!   every render, so runtime changes reach mounted labels
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use kairos_core::{TickScheduler, TimeSource, Toolkit};
//!
//! let toolkit = Toolkit::with_defaults();
//! let scheduler = Rc::new(TickScheduler::new());
//!
//! let mut label = toolkit.time_ago(scheduler.clone());
//! label.set_source(TimeSource::from(chrono::Utc::now()));
//! assert!(label.text().is_some());
//!
//! // Host loop: advance by the elapsed time, dispatch due timers.
//! for id in scheduler.advance(std::time::Duration::from_secs(1)) {
//!     label.timer_fired(id);
//! }
//! ```

// Re-export commonly used items at the crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ConfigHandle, DisplayConfig};
pub use engine::{ChronoEngine, Instant, TimeEngine};
pub use error::{Error, Result};
pub use filters::Filters;
pub use locale::{LocaleChanged, LocaleEvents, LocaleService};
pub use schedule::{Scheduler, TickScheduler, TimerId};
pub use time_ago::TimeAgo;
pub use toolkit::Toolkit;
pub use value::{DurationUnit, TimeSource};

// Public modules
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod filters;
pub mod locale;
pub mod logging;
pub mod schedule;
pub mod time_ago;
pub mod timezone;
pub mod toolkit;
pub mod value;
