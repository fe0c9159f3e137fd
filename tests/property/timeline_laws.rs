// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Timeline Queries
//!
//! These properties pin down the arithmetic every stream relies on: merging
//! two boundary timelines and walking an infinite recurrence.

use cim_reactive_timeline::timeline::{InstantSet, Periodic};
use cim_reactive_timeline::{merge_next, Instant, Timeline};
use proptest::prelude::*;

use crate::fixtures::at;

// ============================================================================
// Strategies
// ============================================================================

fn optional_instant() -> impl Strategy<Value = Option<Instant>> {
    prop::option::of((-1_000_000i64..1_000_000).prop_map(at))
}

fn offsets() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-10_000i64..10_000, 0..30)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Merging is order independent
    #[test]
    fn prop_merge_is_commutative(a in optional_instant(), b in optional_instant()) {
        prop_assert_eq!(merge_next(a, b), merge_next(b, a));
    }

    /// Absence behaves as positive infinity
    #[test]
    fn prop_merge_absence_is_identity(a in optional_instant()) {
        prop_assert_eq!(merge_next(a, None), a);
        prop_assert_eq!(merge_next(None, a), a);
    }

    /// The merge never invents an instant and never picks the later one
    #[test]
    fn prop_merge_picks_earliest(a in optional_instant(), b in optional_instant()) {
        let merged = merge_next(a, b);
        match (a, b) {
            (Some(a), Some(b)) => prop_assert_eq!(merged, Some(a.min(b))),
            _ => prop_assert_eq!(merged, a.or(b)),
        }
    }

    /// Finite timelines answer with the smallest element strictly after the reference
    #[test]
    fn prop_instant_set_next_is_strict(values in offsets(), reference in -10_000i64..10_000) {
        let timeline = InstantSet::from_instants(values.iter().copied().map(at));
        let expected = values.iter().copied().filter(|v| *v > reference).min().map(at);

        prop_assert_eq!(timeline.next_after(at(reference)).unwrap(), expected);
    }

    /// Occurrences bracket every instant at or after the anchor
    #[test]
    fn prop_periodic_brackets_instant(interval in 1i64..5_000, offset in 0i64..1_000_000) {
        let timeline = Periodic::new(at(0), crate::fixtures::ticks(interval)).unwrap();
        let index = timeline.index_at(at(offset)).unwrap();

        let current = timeline.nth(index).unwrap();
        let next = timeline.nth(index + 1).unwrap();
        prop_assert!(current <= at(offset));
        prop_assert!(at(offset) < next);
        prop_assert_eq!(timeline.next_after(at(offset)).unwrap(), Some(next));
    }

    /// Instants before the anchor lead to the anchor itself
    #[test]
    fn prop_periodic_starts_at_anchor(interval in 1i64..5_000, offset in 1i64..1_000_000) {
        let timeline = Periodic::new(at(0), crate::fixtures::ticks(interval)).unwrap();

        prop_assert_eq!(timeline.index_at(at(-offset)), None);
        prop_assert_eq!(timeline.next_after(at(-offset)).unwrap(), Some(at(0)));
    }
}
