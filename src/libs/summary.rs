//! End-of-session report.
//!
//! Built once when a session ends, from that session's running statistics
//! and the comfort thresholds.

use crate::libs::formatter::{format_clock, split_minutes};
use crate::libs::messages::Message;
use crate::libs::sample::{Accumulator, Averages};
use crate::libs::suggestion::SuggestionEvaluator;
use std::time::Duration;

/// Final report of one study session.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub elapsed: Duration,
    pub samples: u64,
    pub averages: Option<Averages>,
    pub advisories: Vec<String>,
}

impl SummaryReport {
    /// Builds the report from the session's statistics.
    ///
    /// Never fails: with no samples the averages stay `None` and no comfort
    /// advisories are produced.
    pub fn build(accumulator: &Accumulator, elapsed: Duration, comfort: &SuggestionEvaluator) -> Self {
        let averages = accumulator.averages();
        let advisories = averages
            .map(|avg| comfort.evaluate(avg.temperature_c, avg.humidity_pct, avg.lux))
            .unwrap_or_default();

        Self {
            elapsed,
            samples: accumulator.count(),
            averages,
            advisories,
        }
    }

    pub fn has_data(&self) -> bool {
        self.averages.is_some()
    }

    /// "MM:SS" rendering of the active time.
    pub fn elapsed_clock(&self) -> String {
        format_clock(self.elapsed)
    }

    /// The report as display lines, in the order they are shown.
    pub fn lines(&self) -> Vec<String> {
        let (minutes, seconds) = split_minutes(self.elapsed);
        let mut lines = vec![
            Message::SummaryHeader.to_string(),
            Message::SummaryTotalTime(minutes, seconds).to_string(),
        ];

        for (label, value, unit) in self.metric_rows() {
            lines.push(
                Message::SummaryAverage {
                    label: label.to_string(),
                    value,
                    unit: unit.to_string(),
                }
                .to_string(),
            );
        }
        lines.extend(self.advisories.iter().cloned());
        lines.push(Message::Goodbye.to_string());
        lines
    }

    /// (label, average, unit) per metric.
    pub fn metric_rows(&self) -> [(&'static str, Option<f64>, &'static str); 3] {
        [
            ("Temp", self.averages.map(|a| a.temperature_c), "C"),
            ("Humidity", self.averages.map(|a| a.humidity_pct), "%"),
            ("Lux", self.averages.map(|a| a.lux), ""),
        ]
    }
}
