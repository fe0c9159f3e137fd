// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Emitted Streams
//!
//! Streams are driven on a virtual clock that jumps straight to the end of
//! the observation window, so every due occurrence is collected in one pass.

use std::task::Poll;

use cim_reactive_timeline::timeline::InstantSet;
use cim_reactive_timeline::{
    Instant, Period, PeriodSet, PeriodTimeline, PeriodTimelineExt, Scheduler, TimelineExt,
    TimelineResult, VirtualScheduler,
};
use futures::stream::BoxStream;
use proptest::prelude::*;
use tokio_test::task;

use crate::fixtures::{at, fixed_now, scheduler};

const WINDOW: i64 = 20_000;

// ============================================================================
// Helpers
// ============================================================================

/// Collect everything a stream emits up to `until`
fn drain<T>(
    stream: BoxStream<'static, TimelineResult<T>>,
    scheduler: &VirtualScheduler,
    until: Instant,
) -> Vec<TimelineResult<T>> {
    let mut stream = task::spawn(stream);
    let mut emitted = Vec::new();
    loop {
        match stream.poll_next() {
            Poll::Ready(Some(item)) => emitted.push(item),
            Poll::Ready(None) => break,
            Poll::Pending if scheduler.now() >= until => break,
            Poll::Pending => scheduler.advance_to(until),
        }
    }
    emitted
}

// ============================================================================
// Strategies
// ============================================================================

fn offsets() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-5_000i64..WINDOW + 5_000, 0..40)
}

/// Disjoint periods built from sorted, distinct boundary offsets
fn period_set() -> impl Strategy<Value = PeriodSet> {
    prop::collection::btree_set(-5_000i64..WINDOW + 5_000, 0..30).prop_map(|boundaries| {
        let boundaries: Vec<i64> = boundaries.into_iter().collect();
        let periods = boundaries
            .chunks_exact(2)
            .map(|pair| Period::between(at(pair[0]), at(pair[1])).unwrap());
        PeriodSet::new(periods).unwrap()
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// An instant stream emits exactly the occurrences inside the window, in order
    #[test]
    fn prop_instant_stream_emits_window_in_order(values in offsets()) {
        let scheduler = scheduler();
        let timeline = InstantSet::from_instants(values.iter().copied().map(at));
        let emitted: Vec<Instant> = drain(
            timeline.to_instant_stream(Some(fixed_now()), scheduler.clone()),
            &scheduler,
            at(WINDOW),
        )
        .into_iter()
        .collect::<TimelineResult<_>>()
        .unwrap();

        let mut expected: Vec<i64> = values.iter().copied().filter(|v| *v > 0 && *v <= WINDOW).collect();
        expected.sort_unstable();
        expected.dedup();
        let expected: Vec<Instant> = expected.into_iter().map(at).collect();

        prop_assert_eq!(&emitted, &expected);
        prop_assert!(emitted.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Every sample agrees with the timeline queried at the same instant
    #[test]
    fn prop_period_samples_match_queries(periods in period_set()) {
        let scheduler = scheduler();
        let samples = drain(
            periods.clone().to_period_stream(Some(fixed_now()), scheduler.clone()),
            &scheduler,
            at(WINDOW),
        );

        prop_assert!(!samples.is_empty());
        for sample in &samples {
            let sample = sample.as_ref().unwrap();
            prop_assert_eq!(sample, &periods.sample_at(sample.instant()).unwrap());
        }
    }

    /// Samples after the priming one are strictly increasing boundaries
    #[test]
    fn prop_period_boundaries_strictly_increase(periods in period_set()) {
        let scheduler = scheduler();
        let instants: Vec<Instant> = drain(
            periods.clone().to_period_stream(Some(fixed_now()), scheduler.clone()),
            &scheduler,
            at(WINDOW),
        )
        .into_iter()
        .map(|sample| sample.unwrap().instant())
        .collect();

        prop_assert_eq!(instants[0], fixed_now());
        prop_assert!(instants.windows(2).all(|pair| pair[0] < pair[1]));

        let boundaries = periods
            .periods()
            .iter()
            .flat_map(|period| [period.start(), period.end()])
            .flatten()
            .filter(|instant| *instant > fixed_now() && *instant <= at(WINDOW))
            .count();
        prop_assert_eq!(instants.len(), boundaries + 1);
    }

    /// Each instant is in exactly one of an active period or a gap, matching membership
    #[test]
    fn prop_sample_state_matches_membership(periods in period_set(), probe in -5_000i64..WINDOW + 5_000) {
        let sample = periods.sample_at(at(probe)).unwrap();
        let member = periods.periods().iter().any(|period| period.contains(at(probe)));

        prop_assert_eq!(sample.is_active(), member);
        prop_assert_eq!(sample.period().is_some(), member);
        prop_assert_eq!(sample.gap_period().is_some(), !member);
    }
}
