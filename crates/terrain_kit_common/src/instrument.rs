//! Optional instrumentation sink for pipeline stages.
//!
//! The host's performance overlay is out of scope; stages only see this
//! trait, injected explicitly rather than looked up through a global.
//! Timing must never affect results, so sinks take `&self` and sit behind
//! `Option<&dyn InstrumentationSink>` at call sites.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Coarse category an operation reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCategory {
    Raster,
    Geometry,
    Compositing,
}

impl OpCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpCategory::Raster => "raster",
            OpCategory::Geometry => "geometry",
            OpCategory::Compositing => "compositing",
        }
    }
}

/// Sink for begin/end timing events.
pub trait InstrumentationSink: Send + Sync {
    fn begin_op(&self, name: &str, category: OpCategory);

    /// Ends a previously begun operation, returning its duration when the
    /// sink tracked one.
    fn end_op(&self, name: &str, category: OpCategory) -> Option<Duration>;
}

/// Sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl InstrumentationSink for NoopSink {
    fn begin_op(&self, _name: &str, _category: OpCategory) {}

    fn end_op(&self, _name: &str, _category: OpCategory) -> Option<Duration> {
        None
    }
}

/// Sink that reports durations through `tracing` at debug level.
#[derive(Debug, Default)]
pub struct TracingSink {
    started: Mutex<HashMap<String, Instant>>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InstrumentationSink for TracingSink {
    fn begin_op(&self, name: &str, _category: OpCategory) {
        if let Ok(mut started) = self.started.lock() {
            started.insert(name.to_string(), Instant::now());
        }
    }

    fn end_op(&self, name: &str, category: OpCategory) -> Option<Duration> {
        let begun = self.started.lock().ok()?.remove(name)?;
        let elapsed = begun.elapsed();
        tracing::debug!(
            op = name,
            category = category.as_str(),
            elapsed_us = elapsed.as_micros() as u64,
            "operation finished"
        );
        Some(elapsed)
    }
}
