// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - `timeline_laws`: boundary merging and recurrence arithmetic
//! - `stream_laws`: ordering and state guarantees of the emitted streams

mod stream_laws;
mod timeline_laws;
