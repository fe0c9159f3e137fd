// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subscriptions - driving a stream on a tokio task
//!
//! ```rust,ignore
//! let subscription = Subscription::spawn(
//!     cycle.to_boolean_stream(None, TokioScheduler::default()),
//!     |active: bool| info!(active, "duty cycle changed"),
//! );
//!
//! // ... later
//! subscription.unsubscribe();
//! ```

use futures::stream::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, error};
use uuid::Uuid;

use crate::errors::{TimelineError, TimelineResult};

/// Receiver of stream notifications
///
/// Any `FnMut(T)` closure is an observer that logs faults and ignores
/// completion.
pub trait TimelineObserver<T>: Send {
    /// Called for each emitted value, in emission order
    fn on_next(&mut self, value: T);

    /// Called once when the stream faults; no further calls follow
    fn on_error(&mut self, error: TimelineError) {
        error!("Timeline stream faulted: {}", error);
    }

    /// Called once when the stream completes without a fault
    fn on_completed(&mut self) {}
}

impl<T, F> TimelineObserver<T> for F
where
    F: FnMut(T) + Send,
{
    fn on_next(&mut self, value: T) {
        self(value)
    }
}

/// Handle to a stream being driven on a background task
///
/// Dropping the handle unsubscribes: the task is aborted, which drops the
/// stream and with it any pending wake-up.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Drive `stream` on the current tokio runtime, forwarding to `observer`
    pub fn spawn<T, St, O>(stream: St, mut observer: O) -> Self
    where
        T: Send + 'static,
        St: Stream<Item = TimelineResult<T>> + Send + 'static,
        O: TimelineObserver<T> + 'static,
    {
        let id = Uuid::now_v7();
        let handle = tokio::spawn(async move {
            debug!(subscription = %id, "Subscription started");
            let mut stream = Box::pin(stream);
            while let Some(item) = stream.next().await {
                match item {
                    Ok(value) => observer.on_next(value),
                    Err(e) => {
                        debug!(subscription = %id, "Subscription faulted");
                        observer.on_error(e);
                        return;
                    }
                }
            }
            observer.on_completed();
            debug!(subscription = %id, "Subscription completed");
        });

        Self {
            id,
            handle: Some(handle),
        }
    }

    /// Identifier used in log output
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether the stream has completed, faulted or been cancelled
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait until the stream completes or faults
    pub async fn finished(mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    error!(subscription = %self.id, "Subscription task panicked");
                }
            }
        }
    }

    /// Stop receiving notifications
    pub fn unsubscribe(self) {
        debug!(subscription = %self.id, "Unsubscribing");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
