// Copyright (c) 2025 - Cowboy AI, Inc.
//! Timelines - Lazily Queried Occurrences
//!
//! A timeline never materializes its occurrences. It only answers one
//! question: "what is the next occurrence strictly after this instant?"
//!
//! ```text
//! reference
//!     │
//! ────┼─────●──────────●────────●────→
//!           └ next_after(reference)
//! ```
//!
//! A [`PeriodTimeline`] is a pair of such timelines (period starts and period
//! ends) plus a resolver that tells whether an instant is inside a period or
//! inside a gap.
//!
//! # Contract
//!
//! - `next_after(r)` returns `Ok(Some(t))` with `t > r`, never `t == r`.
//!   A timeline that repeats an instant stalls or spins any stream built on
//!   it; the streams do not guard against this.
//! - `Ok(None)` means there are no more occurrences (positive infinity).
//! - Starts and ends of a period timeline alternate.

pub mod instants;
pub mod periods;

pub use instants::{from_fn, FnTimeline, InstantSet, Periodic};
pub use periods::{PeriodSet, RecurringPeriods};

use std::sync::Arc;

use crate::errors::TimelineResult;
use crate::time::{Instant, Sample};

/// Source of occurrences answering "next occurrence after X"
pub trait Timeline: Send + Sync {
    /// Next occurrence strictly after `reference`, `None` if there is none
    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>>;
}

/// Alternating period starts and ends with point-in-time resolution
pub trait PeriodTimeline: Send + Sync {
    /// Timeline of period starts
    fn starts(&self) -> &dyn Timeline;

    /// Timeline of period ends
    fn ends(&self) -> &dyn Timeline;

    /// Active period or gap containing `instant`
    fn sample_at(&self, instant: Instant) -> TimelineResult<Sample>;
}

impl<T: Timeline + ?Sized> Timeline for Arc<T> {
    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>> {
        (**self).next_after(reference)
    }
}

impl<T: Timeline + ?Sized> Timeline for &T {
    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>> {
        (**self).next_after(reference)
    }
}

impl<T: Timeline + ?Sized> Timeline for Box<T> {
    fn next_after(&self, reference: Instant) -> TimelineResult<Option<Instant>> {
        (**self).next_after(reference)
    }
}

impl<P: PeriodTimeline + ?Sized> PeriodTimeline for Arc<P> {
    fn starts(&self) -> &dyn Timeline {
        (**self).starts()
    }

    fn ends(&self) -> &dyn Timeline {
        (**self).ends()
    }

    fn sample_at(&self, instant: Instant) -> TimelineResult<Sample> {
        (**self).sample_at(instant)
    }
}

impl<P: PeriodTimeline + ?Sized> PeriodTimeline for &P {
    fn starts(&self) -> &dyn Timeline {
        (**self).starts()
    }

    fn ends(&self) -> &dyn Timeline {
        (**self).ends()
    }

    fn sample_at(&self, instant: Instant) -> TimelineResult<Sample> {
        (**self).sample_at(instant)
    }
}

/// Earliest of two optional instants, treating `None` as positive infinity
///
/// Equal instants collapse into one.
pub fn merge_next(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (Some(a), Some(b)) => Some(a.min(b)),
    }
}

/// Next period boundary (start or end) strictly after `reference`
pub fn next_boundary<P>(timeline: &P, reference: Instant) -> TimelineResult<Option<Instant>>
where
    P: PeriodTimeline + ?Sized,
{
    let start = timeline.starts().next_after(reference)?;
    let end = timeline.ends().next_after(reference)?;
    Ok(merge_next(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use test_case::test_case;

    fn t(seconds: i64) -> Instant {
        Utc.with_ymd_and_hms(2026, 1, 19, 12, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    #[test_case(None, None, None ; "both infinite")]
    #[test_case(Some(3), None, Some(3) ; "only left")]
    #[test_case(None, Some(3), Some(3) ; "only right")]
    #[test_case(Some(3), Some(7), Some(3) ; "left earlier")]
    #[test_case(Some(7), Some(3), Some(3) ; "right earlier")]
    #[test_case(Some(5), Some(5), Some(5) ; "simultaneous")]
    fn test_merge_next(a: Option<i64>, b: Option<i64>, expected: Option<i64>) {
        assert_eq!(merge_next(a.map(t), b.map(t)), expected.map(t));
    }

    #[test]
    fn test_next_boundary_interleaves_starts_and_ends() {
        let periods = PeriodSet::single(crate::time::Period::between(t(10), t(20)).unwrap());

        assert_eq!(next_boundary(&periods, t(0)).unwrap(), Some(t(10)));
        assert_eq!(next_boundary(&periods, t(10)).unwrap(), Some(t(20)));
        assert_eq!(next_boundary(&periods, t(20)).unwrap(), None);
    }

    #[test]
    fn test_arc_timeline_delegates() {
        let timeline: Arc<dyn Timeline> = Arc::new(InstantSet::from_instants([t(1), t(2)]));

        assert_eq!(timeline.next_after(t(1)).unwrap(), Some(t(2)));
    }
}
