// Copyright (c) 2025 - Cowboy AI, Inc.
//! Period Streams
//!
//! Push-based views of a [`PeriodTimeline`]. The start and end timelines are
//! merged into one boundary timeline (earliest next occurrence wins, absence
//! counts as +inf) and each boundary is resolved into a [`Sample`].
//!
//! ```text
//! starts:          ───────[──────────────[────────→
//! ends:            ──────────────)──────────────)──→
//! boundaries:      ───────●──────●───────●──────●──→
//! period stream:   s0     s1     s2      s3     s4
//! ```
//!
//! # Priming sample
//!
//! A period stream always emits `sample_at(reference)` first, before any
//! boundary is due. "No boundary yet" says nothing about whether the
//! timeline is currently active, so the consumer gets the state up front.
//!
//! The "including current" variants prepend one more sample taken at the
//! same reference, so they start with two identical samples.

use futures::stream::{BoxStream, StreamExt};

use super::adapter::{Occurrences, ScheduledStream};
use super::combinators::{defer, prepend};
use crate::errors::TimelineResult;
use crate::scheduler::Scheduler;
use crate::time::{Instant, Sample};
use crate::timeline::{next_boundary, PeriodTimeline};

/// Period boundaries of a timeline, each emitted as a [`Sample`]
///
/// A start and an end at the same instant are one boundary; `sample_at`
/// alone decides the state at that instant.
#[derive(Debug, Clone)]
pub struct BoundaryOccurrences<P> {
    timeline: P,
}

impl<P: PeriodTimeline> BoundaryOccurrences<P> {
    pub fn new(timeline: P) -> Self {
        Self { timeline }
    }
}

impl<P: PeriodTimeline> Occurrences for BoundaryOccurrences<P> {
    type Item = Sample;

    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>> {
        next_boundary(&self.timeline, reference)
    }

    fn resolve(&self, instant: Instant) -> TimelineResult<Sample> {
        self.timeline.sample_at(instant)
    }
}

/// Stream views over any [`PeriodTimeline`]
///
/// `reference` is the instant after which boundaries are emitted. `None`
/// uses the scheduler's clock at the moment the stream is first polled.
pub trait PeriodTimelineExt: PeriodTimeline + Sized + 'static {
    /// Emit the sample at `reference`, then a sample at every boundary
    fn to_period_stream<S: Scheduler>(
        self,
        reference: Option<Instant>,
        scheduler: S,
    ) -> BoxStream<'static, TimelineResult<Sample>> {
        defer(move || {
            let reference = reference.unwrap_or_else(|| scheduler.now());
            let priming = self.sample_at(reference);
            prepend(
                priming,
                ScheduledStream::new(BoundaryOccurrences::new(self), Some(reference), scheduler),
            )
        })
        .boxed()
    }

    /// Emit the current sample, then the period stream from the same instant
    fn to_period_stream_including_current_sample<S: Scheduler>(
        self,
        reference: Option<Instant>,
        scheduler: S,
    ) -> BoxStream<'static, TimelineResult<Sample>> {
        defer(move || {
            let reference = reference.unwrap_or_else(|| scheduler.now());
            let current = self.sample_at(reference);
            prepend(current, self.to_period_stream(Some(reference), scheduler))
        })
        .boxed()
    }

    /// Emit `true` when a period starts and `false` when it ends
    ///
    /// Starts with the state at `reference`.
    fn to_boolean_stream<S: Scheduler>(
        self,
        reference: Option<Instant>,
        scheduler: S,
    ) -> BoxStream<'static, TimelineResult<bool>> {
        self.to_period_stream(reference, scheduler)
            .map(|sample| sample.map(|sample| sample.is_active()))
            .boxed()
    }

    /// Boolean view of [`to_period_stream_including_current_sample`](Self::to_period_stream_including_current_sample)
    fn to_boolean_stream_including_current<S: Scheduler>(
        self,
        reference: Option<Instant>,
        scheduler: S,
    ) -> BoxStream<'static, TimelineResult<bool>> {
        self.to_period_stream_including_current_sample(reference, scheduler)
            .map(|sample| sample.map(|sample| sample.is_active()))
            .boxed()
    }
}

impl<P: PeriodTimeline + 'static> PeriodTimelineExt for P {}
