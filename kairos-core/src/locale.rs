//! Process-wide locale switching with change broadcast.
//!
//! Live labels re-render on locale switches without being re-created: the
//! host subscribes here and routes each [`LocaleChanged`] into its mounted
//! labels.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::engine::TimeEngine;

/// Event sent to every subscriber after the locale switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChanged {
    /// The code now in effect, as reported by the engine.
    pub locale: String,
}

/// Receiving half of the locale broadcast channel.
pub type LocaleEvents = broadcast::Receiver<LocaleChanged>;

/// Wraps the engine's global locale setter and announces switches.
pub struct LocaleService {
    engine: Arc<dyn TimeEngine>,
    tx: broadcast::Sender<LocaleChanged>,
}

impl LocaleService {
    pub fn new(engine: Arc<dyn TimeEngine>) -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { engine, tx }
    }

    /// Switch the locale and notify subscribers. With `None`, just report
    /// the current code; no event is sent.
    pub fn change_language(&self, code: Option<&str>) -> String {
        let Some(code) = code else {
            return self.engine.locale();
        };
        let locale = self.engine.set_locale(code);
        // Nobody listening is fine.
        let _ = self.tx.send(LocaleChanged {
            locale: locale.clone(),
        });
        locale
    }

    /// The active locale code.
    pub fn current(&self) -> String {
        self.engine.locale()
    }

    /// Listen for locale switches.
    pub fn subscribe(&self) -> LocaleEvents {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;

    fn service() -> LocaleService {
        LocaleService::new(Arc::new(MockEngine::new()))
    }

    #[test]
    fn test_no_code_reports_current_without_event() {
        let service = service();
        let mut rx = service.subscribe();
        assert_eq!(service.change_language(None), "en");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_switch_broadcasts_exactly_once() {
        let service = service();
        let mut rx = service.subscribe();
        assert_eq!(service.change_language(Some("fr")), "fr");
        assert_eq!(
            rx.try_recv(),
            Ok(LocaleChanged {
                locale: "fr".to_string()
            })
        );
        assert!(rx.try_recv().is_err());
        assert_eq!(service.current(), "fr");
    }

    #[test]
    fn test_every_subscriber_hears_the_switch() {
        let service = service();
        let mut first = service.subscribe();
        let mut second = service.subscribe();
        service.change_language(Some("de"));
        assert_eq!(first.try_recv().unwrap().locale, "de");
        assert_eq!(second.try_recv().unwrap().locale, "de");
    }
}
