// Copyright (c) 2025 - Cowboy AI, Inc.
//! Virtual-time scheduler for deterministic tests
//!
//! Time only moves when the test calls [`VirtualScheduler::advance_to`] or
//! [`VirtualScheduler::advance_by`]. Every sleeper whose due instant has been
//! reached is woken before the call returns, in registration order.
//!
//! ```rust,ignore
//! let scheduler = VirtualScheduler::new(now);
//! let mut stream = tokio_test::task::spawn(timeline.to_instant_stream(Some(now), scheduler.clone()));
//!
//! assert_pending!(stream.poll_next());
//! scheduler.advance_by(Duration::milliseconds(42));
//! assert_ready_eq!(stream.poll_next(), Some(Ok(now + Duration::milliseconds(42))));
//! ```

use chrono::Duration;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};
use tracing::{trace, warn};

use super::{Scheduler, Sleep};
use crate::time::Instant;

/// Manually advanced clock
///
/// Clones share the same clock.
#[derive(Debug, Clone)]
pub struct VirtualScheduler {
    state: Arc<Mutex<VirtualState>>,
}

#[derive(Debug)]
struct VirtualState {
    now: Instant,
    sleepers: BTreeMap<u64, Sleeper>,
    next_id: u64,
}

#[derive(Debug)]
struct Sleeper {
    due: Instant,
    waker: Option<Waker>,
}

impl VirtualScheduler {
    /// Create a virtual clock reading `start`
    pub fn new(start: Instant) -> Self {
        Self {
            state: Arc::new(Mutex::new(VirtualState {
                now: start,
                sleepers: BTreeMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Move the clock forward to `instant` and wake every due sleeper
    ///
    /// The clock never moves backwards; an earlier `instant` is ignored.
    pub fn advance_to(&self, instant: Instant) {
        let mut to_wake = Vec::new();
        {
            let mut state = lock(&self.state);
            if instant <= state.now {
                return;
            }
            state.now = instant;
            state.sleepers.retain(|_, sleeper| {
                if sleeper.due <= instant {
                    to_wake.extend(sleeper.waker.take());
                    false
                } else {
                    true
                }
            });
        }

        trace!(%instant, woken = to_wake.len(), "virtual clock advanced");
        for waker in to_wake {
            waker.wake();
        }
    }

    /// Move the clock forward by `delta`
    ///
    /// A `delta` leaving the representable calendar range is ignored.
    pub fn advance_by(&self, delta: Duration) {
        match self.now().checked_add_signed(delta) {
            Some(target) => self.advance_to(target),
            None => warn!(%delta, "virtual clock advance out of range, ignored"),
        }
    }

    /// Number of registered wake-ups that have not been reached yet
    pub fn pending_sleeps(&self) -> usize {
        lock(&self.state).sleepers.len()
    }

    /// Earliest registered wake-up, if any
    pub fn next_due(&self) -> Option<Instant> {
        lock(&self.state).sleepers.values().map(|sleeper| sleeper.due).min()
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Instant {
        lock(&self.state).now
    }

    fn sleep_until(&self, due: Instant) -> Sleep {
        let id = {
            let mut state = lock(&self.state);
            let id = state.next_id;
            state.next_id += 1;
            if due > state.now {
                state.sleepers.insert(id, Sleeper { due, waker: None });
            }
            id
        };

        Box::pin(VirtualSleep {
            state: Arc::clone(&self.state),
            id,
            due,
        })
    }
}

struct VirtualSleep {
    state: Arc<Mutex<VirtualState>>,
    id: u64,
    due: Instant,
}

impl Future for VirtualSleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = lock(&self.state);
        if state.now >= self.due {
            state.sleepers.remove(&self.id);
            return Poll::Ready(());
        }

        let due = self.due;
        let sleeper = state
            .sleepers
            .entry(self.id)
            .or_insert(Sleeper { due, waker: None });
        match &sleeper.waker {
            Some(existing) if existing.will_wake(cx.waker()) => {}
            _ => sleeper.waker = Some(cx.waker().clone()),
        }
        Poll::Pending
    }
}

impl Drop for VirtualSleep {
    fn drop(&mut self) {
        lock(&self.state).sleepers.remove(&self.id);
    }
}

fn lock(state: &Mutex<VirtualState>) -> MutexGuard<'_, VirtualState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tokio_test::{assert_pending, assert_ready, task};

    fn t(seconds: i64) -> Instant {
        Utc.with_ymd_and_hms(2026, 1, 19, 12, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    #[test]
    fn test_sleep_completes_when_due() {
        let scheduler = VirtualScheduler::new(t(0));
        let mut sleep = task::spawn(scheduler.sleep_until(t(10)));

        assert_pending!(sleep.poll());
        scheduler.advance_to(t(9));
        assert!(!sleep.is_woken());
        assert_pending!(sleep.poll());

        scheduler.advance_to(t(10));
        assert!(sleep.is_woken());
        assert_ready!(sleep.poll());
        assert_eq!(scheduler.pending_sleeps(), 0);
    }

    #[test]
    fn test_past_instant_is_immediately_due() {
        let scheduler = VirtualScheduler::new(t(5));
        let mut sleep = task::spawn(scheduler.sleep_until(t(5)));

        assert_eq!(scheduler.pending_sleeps(), 0);
        assert_ready!(sleep.poll());
    }

    #[test]
    fn test_dropping_sleep_cancels_wake_up() {
        let scheduler = VirtualScheduler::new(t(0));
        let sleep = scheduler.sleep_until(t(10));

        assert_eq!(scheduler.pending_sleeps(), 1);
        assert_eq!(scheduler.next_due(), Some(t(10)));
        drop(sleep);
        assert_eq!(scheduler.pending_sleeps(), 0);
        assert_eq!(scheduler.next_due(), None);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let scheduler = VirtualScheduler::new(t(10));

        scheduler.advance_to(t(5));
        assert_eq!(scheduler.now(), t(10));

        scheduler.advance_by(Duration::seconds(3));
        assert_eq!(scheduler.now(), t(13));
    }

    #[test]
    fn test_clones_share_the_clock() {
        let scheduler = VirtualScheduler::new(t(0));
        let clone = scheduler.clone();

        clone.advance_to(t(7));
        assert_eq!(scheduler.now(), t(7));
    }

    #[test]
    fn test_advance_beyond_calendar_is_ignored() {
        let scheduler = VirtualScheduler::new(t(0));
        let sleep = scheduler.sleep_until(t(10));

        scheduler.advance_by(Duration::days(365 * 1_000_000));
        assert_eq!(scheduler.now(), t(0));
        assert_eq!(scheduler.pending_sleeps(), 1);
        drop(sleep);
    }
}
