// Copyright (c) 2025 - Cowboy AI, Inc.
//! Functional Reactive Streams over Timelines
//!
//! This module turns pull-based timelines into push-based streams. A
//! timeline only answers "what happens next after X?"; the streams here ask
//! that question once per occurrence, wait on a [`Scheduler`](crate::scheduler::Scheduler) until the
//! occurrence is due, and emit it.
//!
//! # Core Concepts
//!
//! ## Instant streams (discrete occurrences)
//!
//! ```text
//! Time:   ────────────────────────────→
//! Value:      ●       ●   ●       ●
//! ```
//!
//! Every occurrence of a [`Timeline`](crate::timeline::Timeline) is emitted
//! at its own instant. See [`TimelineExt`].
//!
//! ## Period streams (state changes)
//!
//! ```text
//! Time:   ────────────────────────────→
//! State:  ___[‾‾‾‾‾‾)____[‾‾‾‾‾‾‾)____
//! Value:  ●  ●      ●    ●       ●
//! ```
//!
//! Every boundary of a [`PeriodTimeline`](crate::timeline::PeriodTimeline)
//! is emitted as a [`Sample`](crate::time::Sample), preceded by a sample at
//! the reference instant. See [`PeriodTimelineExt`].
//!
//! # Guarantees
//!
//! - Emissions are strictly increasing in time
//! - Nothing is emitted before the scheduler's clock reaches its instant
//! - Only the next occurrence is ever computed; infinite timelines are fine
//! - Each subscription owns its cursor; subscriptions never interfere
//! - Dropping a stream (or its [`Subscription`]) cancels the pending wake-up
//!
//! # Usage
//!
//! ```rust,ignore
//! use cim_reactive_timeline::frp::*;
//! use cim_reactive_timeline::scheduler::TokioScheduler;
//!
//! let cycle = RecurringPeriods::new(anchor, Duration::minutes(10), Duration::minutes(2))?;
//!
//! let mut active = cycle.to_boolean_stream(None, TokioScheduler::default());
//! while let Some(state) = active.next().await {
//!     println!("active: {}", state?);
//! }
//! ```
//!
//! # Testing with virtual time
//!
//! ```rust,ignore
//! let scheduler = VirtualScheduler::new(now);
//! let mut stream = tokio_test::task::spawn(timeline.to_instant_stream(Some(now), scheduler.clone()));
//!
//! assert_pending!(stream.poll_next());
//! scheduler.advance_to(first);
//! assert_ready_eq!(stream.poll_next(), Some(Ok(first)));
//! ```

pub mod adapter;
pub mod combinators;
pub mod instant;
pub mod period;
pub mod subscription;

pub use adapter::{Occurrences, ScheduledStream};
pub use combinators::{defer, prepend};
pub use instant::{InstantOccurrences, TimelineExt};
pub use period::{BoundaryOccurrences, PeriodTimelineExt};
pub use subscription::{Subscription, TimelineObserver};
