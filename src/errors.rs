// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for timeline queries and reactive streams

use thiserror::Error;

use crate::time::Instant;

/// Errors that can occur while querying timelines or driving their streams
///
/// The stream adapters never raise errors of their own. Every variant that
/// reaches a stream consumer originates in a timeline implementation and is
/// forwarded unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    /// A period whose start is not strictly before its end
    #[error("Invalid period: start {start} is not before end {end}")]
    InvalidPeriod { start: Instant, end: Instant },

    /// Periods that overlap or are not in chronological order
    #[error("Overlapping periods: {0}")]
    OverlappingPeriods(String),

    /// A recurrence that can never advance
    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),

    /// The next-occurrence query failed
    #[error("Occurrence query failed: {0}")]
    Query(String),

    /// Resolving a sample at an instant failed
    #[error("Sample resolution failed: {0}")]
    Sample(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for timeline operations
pub type TimelineResult<T> = Result<T, TimelineError>;

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        TimelineError::Configuration(err.to_string())
    }
}
