//! Crate wiring: one place that assembles an engine, the display config,
//! the filters, and the locale service, and hands out live labels bound to
//! all of them.

use std::rc::Rc;
use std::sync::Arc;

use crate::config::{ConfigHandle, DisplayConfig};
use crate::engine::{ChronoEngine, TimeEngine};
use crate::filters::Filters;
use crate::locale::LocaleService;
use crate::schedule::Scheduler;
use crate::time_ago::TimeAgo;

/// Shared services for one process.
pub struct Toolkit {
    engine: Arc<dyn TimeEngine>,
    config: ConfigHandle,
    filters: Filters,
    locale: LocaleService,
}

impl Toolkit {
    /// Wire a toolkit around the given engine and display defaults.
    pub fn new(engine: Arc<dyn TimeEngine>, display: DisplayConfig) -> Self {
        let config = ConfigHandle::new(display);
        let filters = Filters::new(Arc::clone(&engine), config.clone());
        let locale = LocaleService::new(Arc::clone(&engine));
        Self {
            engine,
            config,
            filters,
            locale,
        }
    }

    /// The bundled chrono engine with stock display defaults.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(ChronoEngine::new()), DisplayConfig::default())
    }

    pub fn engine(&self) -> &Arc<dyn TimeEngine> {
        &self.engine
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn locale(&self) -> &LocaleService {
        &self.locale
    }

    /// A fresh live label bound to this toolkit's engine and config.
    pub fn time_ago(&self, scheduler: Rc<dyn Scheduler>) -> TimeAgo {
        TimeAgo::new(Arc::clone(&self.engine), self.config.clone(), scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;
    use crate::schedule::TickScheduler;
    use crate::value::TimeSource;

    #[test]
    fn test_labels_share_the_config_handle() {
        let toolkit = Toolkit::new(Arc::new(MockEngine::new()), DisplayConfig::default());
        let scheduler = Rc::new(TickScheduler::new());
        let mut label = toolkit.time_ago(scheduler);

        toolkit.config().set_without_suffix(true);
        label.set_source(TimeSource::Millis(0));
        assert_eq!(label.text(), Some("moments"));
    }

    #[test]
    fn test_locale_service_drives_the_shared_engine() {
        let toolkit = Toolkit::new(Arc::new(MockEngine::new()), DisplayConfig::default());
        toolkit.locale().change_language(Some("fr"));
        assert_eq!(toolkit.engine().locale(), "fr");
        assert_eq!(toolkit.locale().current(), "fr");
    }

    #[test]
    fn test_default_toolkit_filters_guard_blank_input() {
        let toolkit = Toolkit::with_defaults();
        assert_eq!(toolkit.filters().calendar(&TimeSource::Blank), "");
    }
}
