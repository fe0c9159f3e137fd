// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scheduled Stream - Pull-to-Push Adapter
//!
//! Turns a lazily queried source ("next occurrence after X?") into a
//! [`Stream`] that yields a value exactly when each occurrence becomes due.
//!
//! # State Machine
//!
//! ```text
//!          first poll            sleep completes
//! Idle ──────────────> Scheduled ───────────────> Firing
//!   │                     ▲                          │
//!   │ no occurrence       │   next occurrence        │ resolve(due)
//!   ▼                     └──────────────────────────┤ next_after(due)
//! Completed <────────────────────────────────────────┘ no occurrence
//! ```
//!
//! - Nothing is queried before the first poll.
//! - `Firing` performs one resolve, one query and one scheduling call, then
//!   yields the resolved item.
//! - Only one occurrence is ever pending; sources with infinitely many
//!   occurrences never grow memory.
//! - Dropping the stream drops the pending [`Sleep`](crate::scheduler::Sleep),
//!   which cancels the wake-up. No query runs after the drop.
//! - A fault from the source is yielded once, then the stream completes.

use futures::stream::{FusedStream, Stream};
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::{debug, trace};

use crate::errors::{TimelineError, TimelineResult};
use crate::scheduler::{Scheduler, Sleep};
use crate::time::Instant;

/// One-step contract shared by the instant and period adapters
pub trait Occurrences: Send + Sync {
    /// Value emitted for each occurrence
    type Item;

    /// Next occurrence strictly after `reference`
    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>>;

    /// Value to emit once the occurrence at `instant` is due
    fn resolve(&self, instant: Instant) -> TimelineResult<Self::Item>;
}

enum Step {
    Idle { reference: Option<Instant> },
    Scheduled { due: Instant, sleep: Sleep },
    Faulted(TimelineError),
    Completed,
}

/// Stream emitting one item per occurrence, each at its due instant
pub struct ScheduledStream<O, S> {
    occurrences: O,
    scheduler: S,
    step: Step,
}

impl<O, S> ScheduledStream<O, S>
where
    O: Occurrences,
    S: Scheduler,
{
    /// Create an idle stream
    ///
    /// `reference` is the instant after which occurrences are emitted; `None`
    /// reads the scheduler's clock on first poll.
    pub fn new(occurrences: O, reference: Option<Instant>, scheduler: S) -> Self {
        Self {
            occurrences,
            scheduler,
            step: Step::Idle { reference },
        }
    }

    /// Instant of the pending wake-up, if one is scheduled
    pub fn pending_due(&self) -> Option<Instant> {
        match &self.step {
            Step::Scheduled { due, .. } => Some(*due),
            _ => None,
        }
    }

    fn schedule(&self, next: TimelineResult<Option<Instant>>) -> Step {
        match next {
            Ok(Some(due)) => {
                trace!(%due, "scheduling next occurrence");
                Step::Scheduled {
                    due,
                    sleep: self.scheduler.sleep_until(due),
                }
            }
            Ok(None) => {
                debug!("no further occurrences, completing stream");
                Step::Completed
            }
            Err(error) => Step::Faulted(error),
        }
    }
}

impl<O, S> Unpin for ScheduledStream<O, S> {}

impl<O, S> Stream for ScheduledStream<O, S>
where
    O: Occurrences,
    S: Scheduler,
{
    type Item = TimelineResult<O::Item>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match mem::replace(&mut this.step, Step::Completed) {
                Step::Idle { reference } => {
                    let reference = reference.unwrap_or_else(|| this.scheduler.now());
                    this.step = this.schedule(this.occurrences.next_after(reference));
                }
                Step::Scheduled { due, mut sleep } => {
                    if sleep.as_mut().poll(cx).is_pending() {
                        this.step = Step::Scheduled { due, sleep };
                        return Poll::Pending;
                    }
                    drop(sleep);

                    trace!(%due, "occurrence due");
                    let item = match this.occurrences.resolve(due) {
                        Ok(item) => item,
                        Err(error) => return Poll::Ready(Some(Err(error))),
                    };
                    this.step = this.schedule(this.occurrences.next_after(due));
                    return Poll::Ready(Some(Ok(item)));
                }
                Step::Faulted(error) => return Poll::Ready(Some(Err(error))),
                Step::Completed => return Poll::Ready(None),
            }
        }
    }
}

impl<O, S> FusedStream for ScheduledStream<O, S>
where
    O: Occurrences,
    S: Scheduler,
{
    fn is_terminated(&self) -> bool {
        matches!(self.step, Step::Completed)
    }
}
