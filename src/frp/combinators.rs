// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stream Combinators
//!
//! Small building blocks the instant and period streams are assembled from.
//!
//! ## `defer`
//!
//! Builds the stream on first poll instead of at construction. Every
//! subscription therefore captures its own "now".
//!
//! ```text
//! construct ──── (nothing happens) ──── first poll ──> factory() ──> stream
//! ```
//!
//! ## `prepend`
//!
//! Emits one already computed value before the rest of a stream. A failed
//! value terminates the stream: the rest is never polled.
//!
//! ```text
//! prepend(Ok(a), ──●──●──)  =  a──●──●──
//! prepend(Err(e), ──●──●──) =  e|
//! ```

use futures::future;
use futures::stream::{self, Stream, StreamExt};

use crate::errors::TimelineResult;

/// Build a stream lazily, once, when it is first polled
///
/// # Examples
///
/// ```rust,ignore
/// let stream = defer(move || {
///     let now = scheduler.now();
///     prepend(Ok(now), timeline.to_instant_stream(Some(now), scheduler))
/// });
/// ```
pub fn defer<F, St>(factory: F) -> impl Stream<Item = St::Item>
where
    F: FnOnce() -> St,
    St: Stream,
{
    stream::once(future::lazy(move |_| factory())).flatten()
}

/// Emit `first` before `rest`; an error in `first` ends the stream
pub fn prepend<T, St>(first: TimelineResult<T>, rest: St) -> impl Stream<Item = TimelineResult<T>>
where
    St: Stream<Item = TimelineResult<T>>,
{
    let rest = first.is_ok().then_some(rest);
    stream::once(future::ready(first)).chain(stream::iter(rest).flatten())
}
