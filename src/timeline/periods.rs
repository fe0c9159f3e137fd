// Copyright (c) 2025 - Cowboy AI, Inc.
//! Period Timelines
//!
//! - [`PeriodSet`]: a finite list of ordered, non-overlapping periods
//! - [`RecurringPeriods`]: an infinite duty cycle
//!
//! Both expose their boundaries as two instant timelines (starts, ends) and
//! resolve any instant to the active period or gap around it.

use chrono::Duration;

use super::instants::{InstantSet, Periodic};
use super::{PeriodTimeline, Timeline};
use crate::errors::{TimelineError, TimelineResult};
use crate::time::{Instant, Period, Sample};

/// Finite, ordered, non-overlapping periods
///
/// Adjacent periods (`a.end == b.start`) are allowed. At such an instant the
/// starts and ends timelines both report an occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodSet {
    periods: Vec<Period>,
    starts: InstantSet,
    ends: InstantSet,
}

impl PeriodSet {
    /// Create a period timeline, rejecting unordered or overlapping periods
    pub fn new<I>(periods: I) -> TimelineResult<Self>
    where
        I: IntoIterator<Item = Period>,
    {
        let periods: Vec<Period> = periods.into_iter().collect();

        for pair in periods.windows(2) {
            let (previous, next) = (pair[0], pair[1]);
            let ordered = match (previous.end(), next.start()) {
                (Some(end), Some(start)) => end <= start,
                _ => false,
            };
            if !ordered {
                return Err(TimelineError::OverlappingPeriods(format!(
                    "{previous} is not followed by a disjoint later period, got {next}"
                )));
            }
        }

        Ok(Self::from_ordered(periods))
    }

    /// Timeline with one period
    pub fn single(period: Period) -> Self {
        Self::from_ordered(vec![period])
    }

    /// Timeline without periods; every instant is inside one unbounded gap
    pub fn empty() -> Self {
        Self::default()
    }

    /// Back-to-back periods split at each instant
    ///
    /// `[t1, t2]` yields `(-inf, t1)`, `[t1, t2)` and `[t2, +inf)`, so every
    /// instant of time falls inside some period.
    pub fn consecutive<I>(instants: I) -> Self
    where
        I: IntoIterator<Item = Instant>,
    {
        let boundaries = InstantSet::from_instants(instants);
        let mut periods = Vec::with_capacity(boundaries.len() + 1);
        let mut previous = None;
        for &boundary in boundaries.iter() {
            periods.push(Period::from_bounds_unchecked(previous, Some(boundary)));
            previous = Some(boundary);
        }
        periods.push(Period::from_bounds_unchecked(previous, None));
        Self::from_ordered(periods)
    }

    fn from_ordered(periods: Vec<Period>) -> Self {
        let starts = InstantSet::from_instants(periods.iter().filter_map(Period::start));
        let ends = InstantSet::from_instants(periods.iter().filter_map(Period::end));
        Self {
            periods,
            starts,
            ends,
        }
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }
}

impl PeriodTimeline for PeriodSet {
    fn starts(&self) -> &dyn Timeline {
        &self.starts
    }

    fn ends(&self) -> &dyn Timeline {
        &self.ends
    }

    fn sample_at(&self, instant: Instant) -> TimelineResult<Sample> {
        let index = self
            .periods
            .partition_point(|period| period.start().map_or(true, |start| start <= instant));

        let previous = index.checked_sub(1).map(|i| self.periods[i]);
        if let Some(period) = previous.filter(|period| period.contains(instant)) {
            return Ok(Sample::active(instant, period));
        }

        let gap_start = previous.and_then(|period| period.end());
        let gap_end = self.periods.get(index).and_then(Period::start);
        Ok(Sample::gap(instant, Period::new(gap_start, gap_end)?))
    }
}

/// Infinite duty cycle: a period of `duration` starting every `interval`
///
/// ```text
/// anchor      anchor + interval
///   [====)------[====)------[====)---→
///   duration
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurringPeriods {
    starts: Periodic,
    ends: Periodic,
    duration: Duration,
}

impl RecurringPeriods {
    /// Create a duty cycle; requires `0 < duration <= interval`
    pub fn new(anchor: Instant, interval: Duration, duration: Duration) -> TimelineResult<Self> {
        if duration <= Duration::zero() || duration > interval {
            return Err(TimelineError::InvalidRecurrence(format!(
                "duration {duration} must be positive and not exceed interval {interval}"
            )));
        }
        let end_anchor = anchor.checked_add_signed(duration).ok_or_else(|| {
            TimelineError::InvalidRecurrence(format!("anchor {anchor} + {duration} overflows"))
        })?;

        Ok(Self {
            starts: Periodic::new(anchor, interval)?,
            ends: Periodic::new(end_anchor, interval)?,
            duration,
        })
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn interval(&self) -> Duration {
        self.starts.interval()
    }

    /// Recurrence of period starts
    pub fn starts_timeline(&self) -> &Periodic {
        &self.starts
    }
}

impl PeriodTimeline for RecurringPeriods {
    fn starts(&self) -> &dyn Timeline {
        &self.starts
    }

    fn ends(&self) -> &dyn Timeline {
        &self.ends
    }

    fn sample_at(&self, instant: Instant) -> TimelineResult<Sample> {
        let Some(index) = self.starts.index_at(instant) else {
            return Ok(Sample::gap(instant, Period::until(self.starts.anchor())));
        };

        let start = self.starts.nth(index).ok_or_else(|| {
            TimelineError::Sample(format!("occurrence {index} is outside the calendar range"))
        })?;
        let end = start.checked_add_signed(self.duration);

        match end {
            Some(end) if instant >= end => {
                let next = self.starts.nth(index + 1);
                Ok(Sample::gap(instant, Period::new(Some(end), next)?))
            }
            _ => Ok(Sample::active(instant, Period::new(Some(start), end)?)),
        }
    }
}
