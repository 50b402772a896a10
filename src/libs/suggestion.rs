//! Advisory suggestions derived from desk conditions.
//!
//! Two evaluators share one structure: a band per metric, and a fixed pair
//! of advisories for readings strictly below or strictly above the band.
//! A value sitting exactly on a band edge produces nothing.
//!
//! - the **live** evaluator judges every sample while a session runs;
//! - the **comfort** evaluator judges the session averages for the summary.
//!
//! ```rust
//! use studydesk::libs::suggestion::evaluate;
//!
//! assert!(evaluate(30.0, 50.0, 500.0).is_empty());
//! assert_eq!(evaluate(31.0, 50.0, 500.0), vec!["Turn on the fan"]);
//! ```

use serde::{Deserialize, Serialize};

/// Inclusive band of acceptable values for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn classify(&self, value: f64) -> Option<Side> {
        if value < self.low {
            Some(Side::Below)
        } else if value > self.high {
            Some(Side::Above)
        } else {
            None
        }
    }
}

enum Side {
    Below,
    Above,
}

/// Bands for the three metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub temperature_c: Band,
    pub humidity_pct: Band,
    pub lux: Band,
}

impl Thresholds {
    /// Bands used while sampling.
    pub const fn live() -> Self {
        Self {
            temperature_c: Band::new(18.0, 30.0),
            humidity_pct: Band::new(1.0, 70.0),
            lux: Band::new(100.0, 1000.0),
        }
    }

    /// Comfort bands used for the session summary.
    pub const fn comfort() -> Self {
        Self {
            temperature_c: Band::new(20.0, 25.0),
            humidity_pct: Band::new(40.0, 60.0),
            lux: Band::new(300.0, 1000.0),
        }
    }

    pub fn is_ordered(&self) -> bool {
        [self.temperature_c, self.humidity_pct, self.lux].iter().all(|band| band.low <= band.high)
    }
}

/// Advisory texts for one metric: (below the band, above the band).
type AdvisoryPair = (&'static str, &'static str);

const LIVE_ADVISORIES: [AdvisoryPair; 3] = [
    ("Turn on the heater", "Turn on the fan"),
    ("Turn on a humidifier", "Turn off a humidifier"),
    ("Turn on a lamp", "Reduce lighting"),
];

const COMFORT_ADVISORIES: [AdvisoryPair; 3] = [
    (
        "The room ran cold; warm it up before the next session",
        "The room ran warm; cool it down before the next session",
    ),
    ("The air was dry; consider a humidifier", "The air was humid; consider ventilating the room"),
    ("The desk was dim; add more light", "The desk was very bright; reduce glare"),
];

/// Maps readings to an ordered list of advisories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionEvaluator {
    thresholds: Thresholds,
    advisories: [AdvisoryPair; 3],
}

impl SuggestionEvaluator {
    pub fn live(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            advisories: LIVE_ADVISORIES,
        }
    }

    pub fn comfort(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            advisories: COMFORT_ADVISORIES,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Returns advisories in temperature, humidity, lux order, at most one
    /// per metric.
    pub fn evaluate(&self, temperature_c: f64, humidity_pct: f64, lux: f64) -> Vec<String> {
        let bands = [self.thresholds.temperature_c, self.thresholds.humidity_pct, self.thresholds.lux];
        let values = [temperature_c, humidity_pct, lux];

        bands
            .iter()
            .zip(values)
            .zip(self.advisories.iter())
            .filter_map(|((band, value), (below, above))| match band.classify(value)? {
                Side::Below => Some(below.to_string()),
                Side::Above => Some(above.to_string()),
            })
            .collect()
    }
}

/// Evaluates a reading against the default live bands.
pub fn evaluate(temperature_c: f64, humidity_pct: f64, lux: f64) -> Vec<String> {
    SuggestionEvaluator::live(Thresholds::live()).evaluate(temperature_c, humidity_pct, lux)
}
