//! Destinations for sampled readings.
//!
//! The engine hands every successful sample to a [`ReadingSink`] and only
//! logs a failure; durability is the sink's business. The SQLite sink lives
//! in [`crate::db::readings`].

use crate::libs::error::PersistenceError;
use crate::libs::sample::Sample;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

pub trait ReadingSink: Send {
    fn record(&mut self, timestamp: Instant, sample: &Sample) -> Result<(), PersistenceError>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReadingSink for NullSink {
    fn record(&mut self, _timestamp: Instant, _sample: &Sample) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// Keeps records in memory.
///
/// Clones share the same storage, so a test can hand one clone to the
/// engine and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<(Instant, Sample)>>>,
    failing: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every write fails.
    pub fn failing() -> Self {
        Self {
            records: Arc::default(),
            failing: true,
        }
    }

    pub fn records(&self) -> Vec<(Instant, Sample)> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl ReadingSink for MemorySink {
    fn record(&mut self, timestamp: Instant, sample: &Sample) -> Result<(), PersistenceError> {
        if self.failing {
            return Err(PersistenceError::Unavailable("memory sink configured to fail".to_string()));
        }
        self.records.lock().push((timestamp, *sample));
        Ok(())
    }
}
