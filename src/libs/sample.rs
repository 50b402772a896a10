//! Environmental readings and their running statistics.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Raw values delivered by a sensor source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub lux: f64,
}

/// One reading stamped with the instant the engine took it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub lux: f64,
    pub timestamp: Instant,
}

impl Sample {
    pub fn new(reading: Reading, timestamp: Instant) -> Self {
        Self {
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
            lux: reading.lux,
            timestamp,
        }
    }

    pub fn reading(&self) -> Reading {
        Reading {
            temperature_c: self.temperature_c,
            humidity_pct: self.humidity_pct,
            lux: self.lux,
        }
    }
}

/// Per-metric means over the samples of one session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub lux: f64,
}

/// Running sums for the current session.
///
/// Averages are undefined (`None`) until the first sample is recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    temp_total: f64,
    hum_total: f64,
    lux_total: f64,
    count: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: &Sample) {
        self.temp_total += sample.temperature_c;
        self.hum_total += sample.humidity_pct;
        self.lux_total += sample.lux;
        self.count += 1;
    }

    pub fn averages(&self) -> Option<Averages> {
        if self.count == 0 {
            return None;
        }
        let count = self.count as f64;
        Some(Averages {
            temperature_c: self.temp_total / count,
            humidity_pct: self.hum_total / count,
            lux: self.lux_total / count,
        })
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
