// Copyright (c) 2025 - Cowboy AI, Inc.
//! Wall-clock scheduler backed by the tokio timer

use chrono::Utc;
use std::time::Duration;
use tracing::trace;

use super::{Scheduler, Sleep};
use crate::config::SchedulerConfig;
use crate::time::Instant;

/// Scheduler using UTC wall-clock time and `tokio::time::sleep`
///
/// Must be polled from within a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    config: SchedulerConfig,
}

impl TokioScheduler {
    /// Create a scheduler with the given configuration
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        Utc::now()
    }

    fn sleep_until(&self, due: Instant) -> Sleep {
        let max_sleep = self.config.max_sleep;
        Box::pin(async move {
            loop {
                let remaining = remaining_until(due, Utc::now());
                if remaining.is_zero() {
                    break;
                }
                let slice = remaining.min(max_sleep);
                trace!(%due, ?slice, "waiting for wall clock");
                tokio::time::sleep(slice).await;
            }
        })
    }
}

/// Time left until `due`, zero once it has passed
fn remaining_until(due: Instant, now: Instant) -> Duration {
    (due - now).to_std().unwrap_or(Duration::ZERO)
}
