// Copyright (c) 2025 - Cowboy AI, Inc.
//! Timeline Watcher
//!
//! Runs a recurring duty cycle on the wall clock and prints every emission
//! as a JSON line on stdout.
//!
//! Run with: cargo run --bin timeline-watch
//!
//! Environment:
//! - `WATCH_INTERVAL_SECS`: seconds between period starts (default 10)
//! - `WATCH_ACTIVE_SECS`: length of each period in seconds (default 3)
//! - `WATCH_MODE`: `periods`, `boolean` or `pulses` (default `periods`)
//! - `TIMELINE_MAX_SLEEP_MS`: longest timer slice of the scheduler

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use cim_reactive_timeline::{
    PeriodTimeline, PeriodTimelineExt, RecurringPeriods, Scheduler, SchedulerConfig, TimelineExt,
    TokioScheduler,
};
use futures::stream::{BoxStream, StreamExt};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info, warn};

/// What the watcher emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchMode {
    /// Full samples at every boundary
    Periods,
    /// `true`/`false` at every boundary
    Boolean,
    /// One pulse per period start
    Pulses,
}

impl FromStr for WatchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "periods" => Ok(Self::Periods),
            "boolean" => Ok(Self::Boolean),
            "pulses" => Ok(Self::Pulses),
            other => bail!("unknown WATCH_MODE '{}', expected periods, boolean or pulses", other),
        }
    }
}

/// Configuration for the watcher
#[derive(Debug, Clone)]
struct WatchConfig {
    /// Seconds between period starts
    interval_secs: i64,
    /// Seconds each period stays active
    active_secs: i64,
    /// Output mode
    mode: WatchMode,
    /// Scheduler configuration
    scheduler: SchedulerConfig,
}

impl WatchConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let interval_secs = env_or("WATCH_INTERVAL_SECS", "10")?
            .parse()
            .context("WATCH_INTERVAL_SECS must be an integer")?;

        let active_secs = env_or("WATCH_ACTIVE_SECS", "3")?
            .parse()
            .context("WATCH_ACTIVE_SECS must be an integer")?;

        let mode = env_or("WATCH_MODE", "periods")?.parse()?;

        let scheduler = SchedulerConfig::from_env().context("Invalid scheduler configuration")?;

        Ok(Self {
            interval_secs,
            active_secs,
            mode,
            scheduler,
        })
    }

    /// Duty cycle anchored at `anchor`
    fn cycle(&self, anchor: DateTime<Utc>) -> Result<RecurringPeriods> {
        let interval = Duration::try_seconds(self.interval_secs)
            .context("WATCH_INTERVAL_SECS is out of range")?;
        let active = Duration::try_seconds(self.active_secs)
            .context("WATCH_ACTIVE_SECS is out of range")?;
        RecurringPeriods::new(anchor, interval, active).context("Invalid duty cycle")
    }
}

fn env_or(name: &str, default: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", name)),
    }
}

fn watch_stream<S: Scheduler>(
    cycle: RecurringPeriods,
    mode: WatchMode,
    scheduler: S,
) -> BoxStream<'static, Result<serde_json::Value>> {
    match mode {
        WatchMode::Periods => cycle
            .to_period_stream(None, scheduler)
            .map(|sample| -> Result<serde_json::Value> { Ok(serde_json::to_value(sample?)?) })
            .boxed(),
        WatchMode::Boolean => cycle
            .to_period_stream(None, scheduler)
            .map(|sample| -> Result<serde_json::Value> {
                let sample = sample?;
                Ok(json!({ "at": sample.instant(), "active": sample.is_active() }))
            })
            .boxed(),
        WatchMode::Pulses => {
            let starts = *cycle.starts_timeline();
            starts
                .to_instant_stream(None, scheduler)
                .map(|instant| -> Result<serde_json::Value> {
                    Ok(json!({ "at": instant?, "pulse": true }))
                })
                .boxed()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("🚀 Starting timeline watcher");

    let config = WatchConfig::from_env()?;
    info!("📋 Configuration loaded:");
    info!("  - Interval: {}s", config.interval_secs);
    info!("  - Active: {}s", config.active_secs);
    info!("  - Mode: {:?}", config.mode);
    info!("  - Max timer slice: {:?}", config.scheduler.max_sleep);

    let cycle = config.cycle(Utc::now())?;

    let scheduler = TokioScheduler::new(config.scheduler.clone());
    let current = cycle.sample_at(Utc::now())?;
    info!("🕒 Current state: {}", current);

    let mut emissions = watch_stream(cycle, config.mode, scheduler);
    let mut count = 0u64;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("🛑 Interrupted after {} emissions", count);
                return Ok(());
            }
            next = emissions.next() => match next {
                Some(Ok(value)) => {
                    count += 1;
                    println!("{}", value);
                }
                Some(Err(e)) => {
                    error!("❌ Timeline stream faulted: {}", e);
                    return Err(e);
                }
                None => {
                    warn!("⚠️ Timeline stream ended after {} emissions", count);
                    return Ok(());
                }
            }
        }
    }
}
