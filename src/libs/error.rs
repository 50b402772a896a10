//! Error types for the session engine and its collaborators.

use crate::libs::engine::SessionState;
use std::time::Duration;
use thiserror::Error;

/// A sensor read that did not produce a reading.
///
/// Always recovered inside the engine: the sample is skipped and retried on
/// the next interval.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcquisitionError {
    #[error("sensor did not answer within {0:?}")]
    Timeout(Duration),

    #[error("sensor error: {0}")]
    Sensor(String),

    #[error("sensor worker is gone")]
    Disconnected,
}

/// A reading that could not be stored.
///
/// Logged and dropped; the in-memory statistics keep the sample.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("reading sink unavailable: {0}")]
    Unavailable(String),
}

/// A command the engine refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot {action} while the session is {state}")]
    InvalidTransition { action: &'static str, state: SessionState },

    #[error("the session engine has been shut down")]
    Stopped,
}

/// Configuration values the engine cannot run with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
