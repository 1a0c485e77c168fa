//! Timer scheduling for live labels.
//!
//! The library never owns an event loop; hosts do. [`Scheduler`] is the
//! seam: a label asks for one wake-up after a delay, and the host later
//! routes the fired [`TimerId`] back into it. [`TickScheduler`] is the
//! bundled single-threaded implementation, advanced explicitly by the host
//! loop with real or simulated elapsed time.

use std::cell::RefCell;
use std::time::Duration;

/// Opaque handle for one scheduled wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Host timer service: schedule a one-shot wake-up, or cancel one.
pub trait Scheduler {
    fn schedule(&self, delay: Duration) -> TimerId;
    fn cancel(&self, id: TimerId);
}

#[derive(Debug)]
struct Entry {
    id: TimerId,
    remaining: Duration,
}

/// A single-threaded timer table driven by [`TickScheduler::advance`].
#[derive(Debug, Default)]
pub struct TickScheduler {
    inner: RefCell<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    entries: Vec<Entry>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance virtual time, returning every due timer in deadline order.
    pub fn advance(&self, elapsed: Duration) -> Vec<TimerId> {
        let mut inner = self.inner.borrow_mut();
        let mut due: Vec<(Duration, TimerId)> = Vec::new();
        inner.entries.retain_mut(|entry| {
            if entry.remaining <= elapsed {
                due.push((entry.remaining, entry.id));
                false
            } else {
                entry.remaining -= elapsed;
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Number of timers outstanding.
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Time left for one timer, if it is still scheduled.
    pub fn remaining(&self, id: TimerId) -> Option<Duration> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.remaining)
    }

    /// Time until the soonest timer fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|entry| entry.remaining)
            .min()
    }
}

impl Scheduler for TickScheduler {
    fn schedule(&self, delay: Duration) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = TimerId(inner.next_id);
        inner.entries.push(Entry {
            id,
            remaining: delay,
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.inner
            .borrow_mut()
            .entries
            .retain(|entry| entry.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_only_when_due() {
        let scheduler = TickScheduler::new();
        let id = scheduler.schedule(Duration::from_secs(30));
        assert!(scheduler.advance(Duration::from_secs(29)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_secs(1)), vec![id]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel_removes_timer() {
        let scheduler = TickScheduler::new();
        let id = scheduler.schedule(Duration::from_secs(1));
        scheduler.cancel(id);
        assert!(scheduler.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_due_timers_come_back_in_deadline_order() {
        let scheduler = TickScheduler::new();
        let slow = scheduler.schedule(Duration::from_secs(5));
        let fast = scheduler.schedule(Duration::from_secs(2));
        assert_eq!(scheduler.advance(Duration::from_secs(10)), vec![fast, slow]);
    }

    #[test]
    fn test_partial_advance_decrements_remaining() {
        let scheduler = TickScheduler::new();
        let id = scheduler.schedule(Duration::from_secs(300));
        scheduler.advance(Duration::from_secs(120));
        assert_eq!(scheduler.remaining(id), Some(Duration::from_secs(180)));
    }

    #[test]
    fn test_next_deadline_tracks_soonest_timer() {
        let scheduler = TickScheduler::new();
        assert_eq!(scheduler.next_deadline(), None);
        scheduler.schedule(Duration::from_secs(3600));
        let soon = scheduler.schedule(Duration::from_secs(30));
        assert_eq!(scheduler.next_deadline(), Some(Duration::from_secs(30)));
        scheduler.cancel(soon);
        assert_eq!(scheduler.next_deadline(), Some(Duration::from_secs(3600)));
    }
}
