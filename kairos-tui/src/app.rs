//! Application state for the TUI.

use std::rc::Rc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use kairos_core::{LocaleEvents, TickScheduler, TimeAgo, TimeSource, Toolkit};
use ratatui::widgets::TableState;

/// Locale codes the `l` key cycles through.
pub const LOCALES: &[&str] = &["en", "fr", "de"];

/// Timezone names the `z` key cycles through; empty means local display.
pub const TIMEZONES: &[&str] = &["", "America/New_York", "Asia/Tokyo", "Pacific/Tahiti"];

/// Per-label suffix setting, cycled with the `s` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuffixMode {
    /// Follow the process-wide default.
    #[default]
    Inherit,
    /// Force "ago"/"in" wording on for this label.
    On,
    /// Force the bare wording for this label.
    Off,
}

impl SuffixMode {
    fn next(self) -> Self {
        match self {
            SuffixMode::Inherit => SuffixMode::On,
            SuffixMode::On => SuffixMode::Off,
            SuffixMode::Off => SuffixMode::Inherit,
        }
    }

    /// The stored without-suffix value, or `None` to fall back to the default.
    fn as_override(self) -> Option<bool> {
        match self {
            SuffixMode::Inherit => None,
            SuffixMode::On => Some(false),
            SuffixMode::Off => Some(true),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SuffixMode::Inherit => "default",
            SuffixMode::On => "on",
            SuffixMode::Off => "off",
        }
    }
}

/// One demo label: a seed value plus the live controller rendering it.
pub struct LabelRow {
    /// Short name shown in the table.
    pub name: &'static str,
    /// The value this row feeds to its controller while bound.
    pub source: TimeSource,
    /// Explicit parse pattern the `f` key toggles, if the row has one.
    pub pattern: Option<&'static str>,
    /// Whether the explicit pattern is currently applied.
    pub pattern_on: bool,
    /// Whether the source is currently bound.
    pub bound: bool,
    /// Position in the suffix cycle.
    pub suffix: SuffixMode,
    /// The live controller behind this row.
    pub ctrl: TimeAgo,
}

/// Application state.
pub struct App {
    /// Shared engine, config, filters, and locale service.
    pub toolkit: Toolkit,
    /// Manual scheduler driven by the event loop.
    pub scheduler: Rc<TickScheduler>,
    /// Demo labels.
    pub labels: Vec<LabelRow>,
    /// Table selection state.
    pub table_state: TableState,
    /// Set to true when the user wants to exit.
    pub should_quit: bool,
    locale_rx: LocaleEvents,
    locale_idx: usize,
    timezone_idx: usize,
}

impl App {
    pub fn new(toolkit: Toolkit) -> Self {
        let scheduler = Rc::new(TickScheduler::new());
        let locale_rx = toolkit.locale().subscribe();
        let labels = demo_labels(&toolkit, &scheduler);

        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            toolkit,
            scheduler,
            labels,
            table_state,
            should_quit: false,
            locale_rx,
            locale_idx: 0,
            timezone_idx: 0,
        }
    }

    /// Advance timers by real elapsed time and deliver whatever came due.
    pub fn tick(&mut self, elapsed: Duration) {
        for id in self.scheduler.advance(elapsed) {
            // Controllers ignore timer ids that are not their pending one.
            for row in &mut self.labels {
                row.ctrl.timer_fired(id);
            }
        }
        self.drain_locale_events();
    }

    /// Time until the row's next scheduled refresh.
    pub fn refresh_in(&self, row: &LabelRow) -> Option<Duration> {
        row.ctrl
            .pending_timer()
            .and_then(|id| self.scheduler.remaining(id))
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
            }
            KeyCode::Char('b') => {
                self.toggle_binding();
            }
            KeyCode::Char('s') => {
                self.cycle_suffix();
            }
            KeyCode::Char('f') => {
                self.toggle_pattern();
            }
            KeyCode::Char('d') => {
                let config = self.toolkit.config();
                config.set_without_suffix(!config.snapshot().without_suffix);
            }
            KeyCode::Char('l') => {
                self.locale_idx = (self.locale_idx + 1) % LOCALES.len();
                self.toolkit
                    .locale()
                    .change_language(Some(LOCALES[self.locale_idx]));
            }
            KeyCode::Char('z') => {
                self.timezone_idx = (self.timezone_idx + 1) % TIMEZONES.len();
                self.toolkit
                    .config()
                    .set_timezone(TIMEZONES[self.timezone_idx]);
            }
            _ => {}
        }
    }

    /// The row the cursor is on.
    pub fn selected(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select_next(&mut self) {
        let next = (self.selected() + 1).min(self.labels.len().saturating_sub(1));
        self.table_state.select(Some(next));
    }

    fn select_previous(&mut self) {
        let previous = self.selected().saturating_sub(1);
        self.table_state.select(Some(previous));
    }

    fn toggle_binding(&mut self) {
        let row = &mut self.labels[self.table_state.selected().unwrap_or(0)];
        row.bound = !row.bound;
        if row.bound {
            row.ctrl.set_source(row.source.clone());
        } else {
            row.ctrl.set_source(TimeSource::Blank);
        }
    }

    fn cycle_suffix(&mut self) {
        let row = &mut self.labels[self.table_state.selected().unwrap_or(0)];
        row.suffix = row.suffix.next();
        row.ctrl.set_suffix_override(row.suffix.as_override());
    }

    fn toggle_pattern(&mut self) {
        let row = &mut self.labels[self.table_state.selected().unwrap_or(0)];
        let Some(pattern) = row.pattern else {
            return;
        };
        row.pattern_on = !row.pattern_on;
        let format = row.pattern_on.then(|| pattern.to_string());
        row.ctrl.set_format(format);
    }

    /// Route queued locale switches into every label, coalesced per tick.
    fn drain_locale_events(&mut self) {
        let mut switched = false;
        while self.locale_rx.try_recv().is_ok() {
            switched = true;
        }
        if switched {
            for row in &mut self.labels {
                row.ctrl.notify_locale_changed();
            }
        }
    }
}

/// Build the demo rows, seeded relative to startup time.
fn demo_labels(toolkit: &Toolkit, scheduler: &Rc<TickScheduler>) -> Vec<LabelRow> {
    let now = Utc::now();
    let seeds: [(&'static str, TimeSource, Option<&'static str>, bool); 7] = [
        ("just now", (now - TimeDelta::seconds(10)).into(), None, true),
        ("this hour", (now - TimeDelta::minutes(20)).into(), None, true),
        ("today", (now - TimeDelta::hours(3)).into(), None, true),
        ("last week", (now - TimeDelta::days(5)).into(), None, true),
        ("upcoming", (now + TimeDelta::minutes(90)).into(), None, true),
        (
            "dotted text",
            TimeSource::Text("25.03.2012 13:33".to_string()),
            Some("%d.%m.%Y %H:%M"),
            true,
        ),
        ("unbound", (now - TimeDelta::hours(1)).into(), None, false),
    ];

    seeds
        .into_iter()
        .map(|(name, source, pattern, bound)| {
            let mut ctrl = toolkit.time_ago(scheduler.clone());
            if let Some(pattern) = pattern {
                ctrl.set_format(Some(pattern.to_string()));
            }
            if bound {
                ctrl.set_source(source.clone());
            }
            LabelRow {
                name,
                source,
                pattern,
                pattern_on: pattern.is_some(),
                bound,
                suffix: SuffixMode::default(),
                ctrl,
            }
        })
        .collect()
}
