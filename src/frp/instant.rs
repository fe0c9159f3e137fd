// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instant Streams
//!
//! Push-based views of a single [`Timeline`]:
//!
//! ```text
//! Timeline:        ──────●──────────●──────●──→
//! instant stream:        t1         t2     t3
//! pulse stream:          ()         ()     ()
//! including current: now t1         t2     t3
//! ```

use futures::stream::{BoxStream, StreamExt};

use super::adapter::{Occurrences, ScheduledStream};
use super::combinators::{defer, prepend};
use crate::errors::TimelineResult;
use crate::scheduler::Scheduler;
use crate::time::Instant;
use crate::timeline::Timeline;

/// Occurrences of a timeline, each emitted as its own instant
#[derive(Debug, Clone)]
pub struct InstantOccurrences<T> {
    timeline: T,
}

impl<T: Timeline> InstantOccurrences<T> {
    pub fn new(timeline: T) -> Self {
        Self { timeline }
    }
}

impl<T: Timeline> Occurrences for InstantOccurrences<T> {
    type Item = Instant;

    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>> {
        self.timeline.next_after(reference)
    }

    fn resolve(&self, instant: Instant) -> TimelineResult<Instant> {
        Ok(instant)
    }
}

/// Stream views over any [`Timeline`]
///
/// `reference` is the instant after which occurrences are emitted. `None`
/// uses the scheduler's clock at the moment the stream is first polled.
pub trait TimelineExt: Timeline + Sized + 'static {
    /// Emit every occurrence as an instant when it becomes due
    fn to_instant_stream<S: Scheduler>(
        self,
        reference: Option<Instant>,
        scheduler: S,
    ) -> BoxStream<'static, TimelineResult<Instant>> {
        ScheduledStream::new(InstantOccurrences::new(self), reference, scheduler).boxed()
    }

    /// Emit the reference instant immediately, then every occurrence
    ///
    /// The emitted reference and the instant the occurrences are queried
    /// from are the same value, captured once per subscription.
    fn to_instant_stream_including_current<S: Scheduler>(
        self,
        reference: Option<Instant>,
        scheduler: S,
    ) -> BoxStream<'static, TimelineResult<Instant>> {
        defer(move || {
            let reference = reference.unwrap_or_else(|| scheduler.now());
            prepend(Ok(reference), self.to_instant_stream(Some(reference), scheduler))
        })
        .boxed()
    }

    /// Emit `()` for every occurrence
    fn to_pulse_stream<S: Scheduler>(
        self,
        reference: Option<Instant>,
        scheduler: S,
    ) -> BoxStream<'static, TimelineResult<()>> {
        self.to_instant_stream(reference, scheduler)
            .map(|instant| instant.map(|_| ()))
            .boxed()
    }
}

impl<T: Timeline + 'static> TimelineExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::VirtualScheduler;
    use crate::timeline::{InstantSet, Periodic};
    use chrono::{Duration, TimeZone, Utc};
    use tokio_test::{assert_pending, assert_ready_eq, task};

    fn t(seconds: i64) -> Instant {
        Utc.with_ymd_and_hms(2026, 1, 19, 12, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    #[test]
    fn test_including_current_without_reference_uses_subscription_time() {
        let scheduler = VirtualScheduler::new(t(0));
        let stream = Periodic::new(t(0), Duration::seconds(10))
            .unwrap()
            .to_instant_stream_including_current(None, scheduler.clone());

        scheduler.advance_to(t(3));
        let mut stream = task::spawn(stream);

        assert_ready_eq!(stream.poll_next(), Some(Ok(t(3))));
        assert_pending!(stream.poll_next());
        assert_eq!(scheduler.next_due(), Some(t(10)));
    }

    #[test]
    fn test_pulse_stream_erases_timestamp() {
        let scheduler = VirtualScheduler::new(t(0));
        let mut stream = task::spawn(
            InstantSet::from_instants([t(5)]).to_pulse_stream(Some(t(0)), scheduler.clone()),
        );

        assert_pending!(stream.poll_next());
        scheduler.advance_to(t(5));
        assert_ready_eq!(stream.poll_next(), Some(Ok(())));
        assert_ready_eq!(stream.poll_next(), None);
    }
}
