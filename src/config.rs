// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scheduler configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{TimelineError, TimelineResult};

/// Environment variable overriding [`SchedulerConfig::max_sleep`] (milliseconds)
pub const MAX_SLEEP_ENV: &str = "TIMELINE_MAX_SLEEP_MS";

/// Configuration for the real-time scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Longest single timer wait before the wall clock is re-read
    ///
    /// Timers run on the monotonic clock while occurrences are UTC instants.
    /// Waiting in bounded slices keeps a wall-clock adjustment from shifting
    /// an emission by more than this amount.
    pub max_sleep: Duration,
}

impl SchedulerConfig {
    /// Create a configuration with the given maximum timer slice
    pub fn new(max_sleep: Duration) -> TimelineResult<Self> {
        Self::default().with_max_sleep(max_sleep)
    }

    /// Set the maximum timer slice
    pub fn with_max_sleep(mut self, max_sleep: Duration) -> TimelineResult<Self> {
        if max_sleep.is_zero() {
            return Err(TimelineError::Configuration(
                "max_sleep must be greater than zero".to_string(),
            ));
        }
        self.max_sleep = max_sleep;
        Ok(self)
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> TimelineResult<Self> {
        match std::env::var(MAX_SLEEP_ENV) {
            Ok(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|e| {
                    TimelineError::Configuration(format!("{MAX_SLEEP_ENV}={raw:?}: {e}"))
                })?;
                Self::new(Duration::from_millis(millis))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Parse a JSON configuration document
    pub fn from_json(json: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Self::new(config.max_sleep)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_sleep: Duration::from_secs(60),
        }
    }
}
