// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-reactive-timeline
//!
//! All instants are derived from one fixed timestamp so that every scenario
//! is reproducible. Offsets are expressed in ticks of one millisecond.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};

use cim_reactive_timeline::VirtualScheduler;

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

/// Gap between the reference instant and the first occurrence
pub const FIRST_GAP: i64 = 42;

/// Gap between the first and second occurrence
pub const SECOND_GAP: i64 = 1337;

/// Parse the fixed timestamp
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// Duration of `n` ticks
pub fn ticks(n: i64) -> Duration {
    Duration::milliseconds(n)
}

/// Instant `n` ticks after the fixed timestamp
pub fn at(n: i64) -> DateTime<Utc> {
    fixed_now() + ticks(n)
}

/// Virtual scheduler reading the fixed timestamp
pub fn scheduler() -> VirtualScheduler {
    VirtualScheduler::new(fixed_now())
}
