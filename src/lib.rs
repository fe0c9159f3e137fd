// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reactive timelines for the Composable Information Machine
//!
//! This crate converts lazily queried timelines ("what is the next
//! occurrence after X?") into push-based streams of instants and period
//! samples, driven by a pluggable scheduler so that the same logic runs on
//! the wall clock and on a virtual clock in tests.
//!
//! - [`time`]: instants, periods and samples
//! - [`timeline`]: the query interfaces and concrete timelines
//! - [`scheduler`]: real (tokio) and virtual clocks
//! - [`frp`]: the stream adapters and subscriptions

pub mod config;
pub mod errors;
pub mod frp;
pub mod scheduler;
pub mod time;
pub mod timeline;

// Re-export commonly used types
pub use config::SchedulerConfig;
pub use errors::{TimelineError, TimelineResult};
pub use frp::{PeriodTimelineExt, Subscription, TimelineExt, TimelineObserver};
pub use scheduler::{Scheduler, TokioScheduler, VirtualScheduler};
pub use time::{Instant, Period, Sample, SampleState};
pub use timeline::{merge_next, PeriodSet, PeriodTimeline, RecurringPeriods, Timeline};
