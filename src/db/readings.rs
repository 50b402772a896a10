//! Stored sensor readings.
//!
//! [`Readings`] is the table gateway; [`SqliteSink`] adapts it to the
//! engine's [`ReadingSink`], translating monotonic sample instants into
//! local wall-clock time.

use crate::db::db::Db;
use crate::libs::error::PersistenceError;
use crate::libs::sample::{Reading, Sample};
use crate::libs::sink::ReadingSink;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::sync::Arc;
use std::time::Instant;

const SCHEMA_READINGS: &str = "CREATE TABLE IF NOT EXISTS readings (
    id INTEGER NOT NULL PRIMARY KEY,
    recorded_at TIMESTAMP NOT NULL,
    temperature_c REAL NOT NULL,
    humidity_pct REAL NOT NULL,
    lux REAL NOT NULL
)";

const INSERT_READING: &str = "INSERT INTO readings (recorded_at, temperature_c, humidity_pct, lux) VALUES (?1, ?2, ?3, ?4)";

const SELECT_LATEST: &str = "SELECT id, recorded_at, temperature_c, humidity_pct, lux FROM readings ORDER BY id DESC LIMIT ?1";

const COUNT_READINGS: &str = "SELECT COUNT(*) FROM readings";

/// One row of the readings table.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReading {
    pub id: i64,
    pub recorded_at: NaiveDateTime,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub lux: f64,
}

#[derive(Clone)]
pub struct Readings {
    pub conn: Arc<Mutex<Connection>>,
}

impl Readings {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_READINGS, [])?;

        Ok(Readings {
            conn: Arc::new(Mutex::new(db.conn)),
        })
    }

    pub fn insert(&self, recorded_at: NaiveDateTime, reading: &Reading) -> rusqlite::Result<i64> {
        let conn = self.conn.lock();
        conn.execute(
            INSERT_READING,
            params![recorded_at, reading.temperature_c, reading.humidity_pct, reading.lux],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Most recent readings first.
    pub fn latest(&self, limit: usize) -> Result<Vec<StoredReading>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_LATEST)?;
        let rows = stmt.query_map([limit as i64], |row| {
            Ok(StoredReading {
                id: row.get(0)?,
                recorded_at: row.get(1)?,
                temperature_c: row.get(2)?,
                humidity_pct: row.get(3)?,
                lux: row.get(4)?,
            })
        })?;

        let readings = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(readings)
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row(COUNT_READINGS, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Writes engine samples into the readings table.
pub struct SqliteSink {
    readings: Readings,
    anchor: (Instant, DateTime<Local>),
}

impl SqliteSink {
    pub fn new(readings: Readings) -> Self {
        Self {
            readings,
            anchor: (Instant::now(), Local::now()),
        }
    }

    /// Uses a fixed pairing of monotonic and wall-clock time.
    pub fn with_anchor(readings: Readings, instant: Instant, wall: DateTime<Local>) -> Self {
        Self {
            readings,
            anchor: (instant, wall),
        }
    }

    fn wall_time(&self, timestamp: Instant) -> Result<DateTime<Local>, PersistenceError> {
        let (anchor_instant, anchor_wall) = self.anchor;
        let offset = TimeDelta::from_std(timestamp.saturating_duration_since(anchor_instant))
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        Ok(anchor_wall + offset)
    }
}

impl ReadingSink for SqliteSink {
    fn record(&mut self, timestamp: Instant, sample: &Sample) -> Result<(), PersistenceError> {
        let recorded_at = self.wall_time(timestamp)?.naive_local();
        self.readings.insert(recorded_at, &sample.reading())?;
        Ok(())
    }
}
