// Copyright (c) 2025 - Cowboy AI, Inc.
//! Time Values
//!
//! Immutable value types shared by timelines, schedulers and streams.
//!
//! ```text
//! Period:   [start, end)        start/end absent = -inf/+inf
//!
//! Time: ──────[=========)──────────[=========)────→
//! Sample:  Gap   Active     Gap       Active   Gap
//! ```
//!
//! A [`Sample`] is a snapshot of a period timeline at one instant. It carries
//! exactly one of an active period or a gap; the [`SampleState`] enum makes
//! any other combination unrepresentable.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{TimelineError, TimelineResult};

/// A single point on the UTC timeline
pub type Instant = DateTime<Utc>;

/// Half-open interval `[start, end)` with optional bounds
///
/// An absent start means negative infinity, an absent end positive infinity.
/// When both bounds are present `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    start: Option<Instant>,
    end: Option<Instant>,
}

/// Unvalidated wire form of [`Period`]
#[derive(Deserialize)]
struct RawPeriod {
    start: Option<Instant>,
    end: Option<Instant>,
}

impl TryFrom<RawPeriod> for Period {
    type Error = TimelineError;

    fn try_from(raw: RawPeriod) -> TimelineResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl Period {
    /// Create a period, rejecting empty or inverted bounds
    pub fn new(start: Option<Instant>, end: Option<Instant>) -> TimelineResult<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Err(TimelineError::InvalidPeriod { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// The period covering all of time
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// `(-inf, end)`
    pub fn until(end: Instant) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// `[start, +inf)`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// `[start, end)` with both bounds present
    pub fn between(start: Instant, end: Instant) -> TimelineResult<Self> {
        Self::new(Some(start), Some(end))
    }

    /// Caller guarantees `start < end`
    pub(crate) fn from_bounds_unchecked(start: Option<Instant>, end: Option<Instant>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Option<Instant> {
        self.start
    }

    pub fn end(&self) -> Option<Instant> {
        self.end
    }

    /// Whether `instant` lies inside `[start, end)`
    pub fn contains(&self, instant: Instant) -> bool {
        self.start.map_or(true, |start| start <= instant) && self.end.map_or(true, |end| instant < end)
    }

    /// Length of the period, `None` when either bound is infinite
    pub fn duration(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(start) => write!(f, "[{}, ", start.to_rfc3339())?,
            None => write!(f, "(-inf, ")?,
        }
        match self.end {
            Some(end) => write!(f, "{})", end.to_rfc3339()),
            None => write!(f, "+inf)"),
        }
    }
}

/// Active-or-gap state of a period timeline at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "period", rename_all = "snake_case")]
pub enum SampleState {
    /// Inside a period
    Active(Period),
    /// Between periods
    Gap(Period),
}

/// Snapshot of a period timeline at a specific instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    instant: Instant,
    state: SampleState,
}

impl Sample {
    /// Sample taken inside `period`
    pub fn active(instant: Instant, period: Period) -> Self {
        Self {
            instant,
            state: SampleState::Active(period),
        }
    }

    /// Sample taken inside the gap `gap`
    pub fn gap(instant: Instant, gap: Period) -> Self {
        Self {
            instant,
            state: SampleState::Gap(gap),
        }
    }

    pub fn instant(&self) -> Instant {
        self.instant
    }

    pub fn state(&self) -> &SampleState {
        &self.state
    }

    /// True iff the sample lies inside a period
    pub fn is_active(&self) -> bool {
        matches!(self.state, SampleState::Active(_))
    }

    /// The active period, if any
    pub fn period(&self) -> Option<&Period> {
        match &self.state {
            SampleState::Active(period) => Some(period),
            SampleState::Gap(_) => None,
        }
    }

    /// The gap, if any
    pub fn gap_period(&self) -> Option<&Period> {
        match &self.state {
            SampleState::Gap(gap) => Some(gap),
            SampleState::Active(_) => None,
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            SampleState::Active(period) => write!(f, "{} active {}", self.instant.to_rfc3339(), period),
            SampleState::Gap(gap) => write!(f, "{} gap {}", self.instant.to_rfc3339(), gap),
        }
    }
}
