// Copyright (c) 2025 - Cowboy AI, Inc.
//! Schedulers - Real and Virtual Clocks
//!
//! A [`Scheduler`] answers two questions: "what time is it?" and "wake me at
//! instant T". Streams only ever ask those two questions, so the same stream
//! logic runs against the wall clock in production and against a manually
//! advanced clock in tests.
//!
//! ```text
//!             ┌────────────────────┐
//! stream ───> │ sleep_until(due)   │ ──> Sleep future (drop = cancel)
//!             │ now()              │
//!             └────────────────────┘
//!                ▲              ▲
//!        TokioScheduler   VirtualScheduler
//!        (UTC + tokio)    (advance_to / advance_by)
//! ```
//!
//! # Cancellation
//!
//! A pending wake-up is represented by its [`Sleep`] future. Dropping the
//! future cancels the wake-up; there is no separate handle to manage.

pub mod realtime;
pub mod virtual_time;

pub use realtime::TokioScheduler;
pub use virtual_time::VirtualScheduler;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::time::Instant;

/// Pending wake-up returned by [`Scheduler::sleep_until`]
///
/// Completes once the scheduler's clock has reached the requested instant.
pub type Sleep = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Clock capable of waking a task at an absolute instant
pub trait Scheduler: Send + Sync + 'static {
    /// Current instant according to this scheduler's clock
    fn now(&self) -> Instant;

    /// Future that completes when the clock reaches `due`
    ///
    /// A `due` at or before `now()` completes on first poll.
    fn sleep_until(&self, due: Instant) -> Sleep;
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep_until(&self, due: Instant) -> Sleep {
        (**self).sleep_until(due)
    }
}
