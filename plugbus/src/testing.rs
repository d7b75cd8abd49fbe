//! Testing utilities for plugbus.
//!
//! This module provides utilities to make testing modules and handlers easier.
//!
//! # Features
//!
//! - [`RecordingHandler`]: a pass-through handler that records every payload
//! - [`CountingHandler`]: a pass-through handler that counts invocations
//! - [`suffix`]: a handler factory for `String` pipelines

use parking_lot::Mutex;
use plugbus_core::{Handler, Payload};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Handler
// ============================================================================

/// A pass-through handler that records every payload it receives.
///
/// Useful for verifying that dispatch reaches a handler with the expected
/// data. Clones share the same recording.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::<String>::new();
/// let bus = Bus::builder()
///     .module("tap", Manifest::new().on("t", recorder.clone()))
///     .build()
///     .await?;
///
/// bus.serial("t", "hello".into())?;
/// assert_eq!(recorder.calls(), vec!["hello".to_owned()]);
/// ```
pub struct RecordingHandler<T: Clone> {
    seen: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> RecordingHandler<T> {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded payloads.
    pub fn calls(&self) -> Vec<T> {
        self.seen.lock().clone()
    }

    /// Get the number of recorded payloads.
    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }

    /// Clear the recording.
    pub fn clear(&self) {
        self.seen.lock().clear();
    }
}

impl<T: Clone> Default for RecordingHandler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RecordingHandler<T> {
    fn clone(&self) -> Self {
        Self {
            seen: self.seen.clone(),
        }
    }
}

impl<T: Payload + Clone> Handler<T> for RecordingHandler<T> {
    fn call(&self, data: T) -> T {
        self.seen.lock().push(data.clone());
        data
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A pass-through handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// let bus = Bus::builder()
///     .module("tap", Manifest::new().on("t", counter.clone()))
///     .build()
///     .await?;
///
/// bus.serial("t", payload)?;
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingHandler {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl<T: Payload> Handler<T> for CountingHandler {
    fn call(&self, data: T) -> T {
        self.count.fetch_add(1, Ordering::SeqCst);
        data
    }
}

// ============================================================================
// Suffix Handler
// ============================================================================

/// Build a handler that appends `-tag` to a `String` payload.
///
/// Fold laws read off directly: a topic holding `suffix("1")` then
/// `suffix("2")` turns the seed `"0"` into `"0-1-2"`.
pub fn suffix(tag: &str) -> impl Fn(String) -> String + Send + Sync + 'static {
    let tag = tag.to_owned();
    move |data: String| format!("{data}-{tag}")
}
