// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instant Timelines
//!
//! - [`InstantSet`]: a finite set of instants
//! - [`Periodic`]: an infinite recurrence `anchor + k * interval`
//! - [`FnTimeline`]: any closure answering the next-occurrence query

use chrono::Duration;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Bound;

use super::Timeline;
use crate::errors::{TimelineError, TimelineResult};
use crate::time::Instant;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Largest offset (in seconds) worth attempting; anything beyond is outside
/// the representable calendar range.
const MAX_OFFSET_SECONDS: i128 = 100_000_000_000_000;

/// Finite, ordered set of instants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstantSet {
    instants: BTreeSet<Instant>,
}

impl InstantSet {
    /// Create a timeline from instants in any order; duplicates collapse
    pub fn from_instants<I>(instants: I) -> Self
    where
        I: IntoIterator<Item = Instant>,
    {
        Self {
            instants: instants.into_iter().collect(),
        }
    }

    /// Timeline without occurrences
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Instants in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &Instant> {
        self.instants.iter()
    }
}

impl Timeline for InstantSet {
    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>> {
        Ok(self
            .instants
            .range((Bound::Excluded(reference), Bound::Unbounded))
            .next()
            .copied())
    }
}

/// Infinite recurrence starting at `anchor`, one occurrence per `interval`
///
/// The recurrence ends silently once the next occurrence would fall outside
/// the representable calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodic {
    anchor: Instant,
    interval: Duration,
    step: i128,
}

impl Periodic {
    /// Create a recurrence; `interval` must be strictly positive
    pub fn new(anchor: Instant, interval: Duration) -> TimelineResult<Self> {
        if interval <= Duration::zero() {
            return Err(TimelineError::InvalidRecurrence(format!(
                "interval must be positive, got {interval}"
            )));
        }
        Ok(Self {
            anchor,
            interval,
            step: to_nanos(interval),
        })
    }

    pub fn anchor(&self) -> Instant {
        self.anchor
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Index of the last occurrence at or before `instant`
    ///
    /// `None` when `instant` precedes the anchor.
    pub fn index_at(&self, instant: Instant) -> Option<i128> {
        if instant < self.anchor {
            return None;
        }
        Some(to_nanos(instant - self.anchor) / self.step)
    }

    /// The `index`-th occurrence, `None` past the representable range
    pub fn nth(&self, index: i128) -> Option<Instant> {
        let offset = index.checked_mul(self.step)?;
        let seconds = offset / NANOS_PER_SECOND;
        if !(-MAX_OFFSET_SECONDS..=MAX_OFFSET_SECONDS).contains(&seconds) {
            return None;
        }
        let nanos = offset % NANOS_PER_SECOND;
        let delta = Duration::seconds(seconds as i64) + Duration::nanoseconds(nanos as i64);
        self.anchor.checked_add_signed(delta)
    }
}

impl Timeline for Periodic {
    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>> {
        match self.index_at(reference) {
            None => Ok(Some(self.anchor)),
            Some(index) => Ok(self.nth(index + 1)),
        }
    }
}

fn to_nanos(duration: Duration) -> i128 {
    let seconds = duration.num_seconds();
    let rest = (duration - Duration::seconds(seconds))
        .num_nanoseconds()
        .unwrap_or(0);
    i128::from(seconds) * NANOS_PER_SECOND + i128::from(rest)
}

/// Timeline backed by a closure
#[derive(Clone)]
pub struct FnTimeline<F> {
    query: F,
}

impl<F> fmt::Debug for FnTimeline<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnTimeline<{}>", std::any::type_name::<F>())
    }
}

impl<F> Timeline for FnTimeline<F>
where
    F: Fn(Instant) -> TimelineResult<Option<Instant>> + Send + Sync,
{
    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>> {
        (self.query)(reference)
    }
}

/// Wrap a next-occurrence closure as a [`Timeline`]
///
/// ```rust,ignore
/// let every_minute = timeline::from_fn(|reference| {
///     Ok(Some(reference + Duration::minutes(1)))
/// });
/// ```
pub fn from_fn<F>(query: F) -> FnTimeline<F>
where
    F: Fn(Instant) -> TimelineResult<Option<Instant>> + Send + Sync,
{
    FnTimeline { query }
}
