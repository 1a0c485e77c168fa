//! Optional timezone application for display output.

use tracing::warn;

use crate::engine::Instant;

/// Shift `instant` into the named timezone when possible.
///
/// An empty name means "no timezone configured" and passes the instant
/// through. A missing conversion capability also passes it through with a
/// one-line warning; output values are unaffected either way.
pub fn apply_timezone(instant: Box<dyn Instant>, timezone: &str) -> Box<dyn Instant> {
    if timezone.is_empty() {
        return instant;
    }
    match instant.in_timezone(timezone) {
        Some(shifted) => shifted,
        None => {
            warn!(
                timezone,
                "engine has no timezone conversion; value left unadjusted"
            );
            instant
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::engine::mock::MockEngine;
    use crate::engine::TimeEngine;
    use crate::value::TimeSource;

    #[test]
    fn test_empty_name_passes_through() {
        let engine = MockEngine::new();
        let state = engine.state();
        let instant = engine.parse(&TimeSource::from(0i64), None);
        let out = apply_timezone(instant, "");
        assert_eq!(out.calendar(), "Today at 1:33 PM");
        assert!(state.last_timezone.read().unwrap().is_none());
    }

    #[test]
    fn test_missing_capability_degrades() {
        let engine = MockEngine::new();
        let state = engine.state();
        let instant = engine.parse(&TimeSource::from(0i64), None);
        let out = apply_timezone(instant, "Pacific/Tahiti");
        assert_eq!(out.calendar(), "Today at 1:33 PM");
        assert_eq!(
            state.last_timezone.read().unwrap().as_deref(),
            Some("Pacific/Tahiti")
        );
    }

    #[test]
    fn test_capable_instants_are_converted() {
        let engine = MockEngine::new();
        let state = engine.state();
        state.tz_capable.store(true, Ordering::Relaxed);
        let instant = engine.parse(&TimeSource::from(0i64), None);
        let out = apply_timezone(instant, "Europe/Paris");
        assert!(out.is_valid());
        assert_eq!(
            state.last_timezone.read().unwrap().as_deref(),
            Some("Europe/Paris")
        );
    }
}
