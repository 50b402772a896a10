//! SQLite persistence for sampled readings.
//!
//! The database file lives next to the configuration in the per-user data
//! directory. Each table module creates its schema on open.
//!
//! ```rust,no_run
//! use studydesk::db::readings::Readings;
//!
//! let readings = Readings::new()?;
//! for reading in readings.latest(10)? {
//!     println!("{} {}", reading.recorded_at, reading.temperature_c);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod readings;
