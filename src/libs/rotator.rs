//! Round-robin status lines.
//!
//! Each call to [`StatusRotator::next`] renders one template and moves on to
//! the next, wrapping after the last one. The engine calls it once per
//! successful sample, so the status line walks through elapsed time and the
//! three readings while a session runs.

use super::formatter::{format_clock, format_optional};
use super::sample::{Averages, Sample};
use std::time::Duration;

/// What a status line can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Elapsed,
    Temperature,
    Humidity,
    Lux,
}

impl Template {
    pub const ALL: [Template; 4] = [Template::Elapsed, Template::Temperature, Template::Humidity, Template::Lux];
}

/// Values a template may reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusContext<'a> {
    pub elapsed: Duration,
    pub sample: Option<&'a Sample>,
    pub averages: Option<&'a Averages>,
}

impl StatusContext<'_> {
    fn render(&self, template: Template) -> String {
        match template {
            Template::Elapsed => format!("Session: {}", format_clock(self.elapsed)),
            Template::Temperature => format!(
                "Temp: {}C (avg {}C)",
                format_optional(self.sample.map(|s| s.temperature_c)),
                format_optional(self.averages.map(|a| a.temperature_c))
            ),
            Template::Humidity => format!(
                "Humidity: {}% (avg {}%)",
                format_optional(self.sample.map(|s| s.humidity_pct)),
                format_optional(self.averages.map(|a| a.humidity_pct))
            ),
            Template::Lux => format!(
                "Lux: {} (avg {})",
                format_optional(self.sample.map(|s| s.lux)),
                format_optional(self.averages.map(|a| a.lux))
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusRotator {
    templates: Vec<Template>,
    cycle_index: usize,
}

impl StatusRotator {
    /// # Panics
    ///
    /// Panics if `templates` is empty.
    pub fn new(templates: Vec<Template>) -> Self {
        assert!(!templates.is_empty(), "status rotator needs at least one template");
        Self {
            templates,
            cycle_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn cycle_index(&self) -> usize {
        self.cycle_index
    }

    /// Renders the current template and advances to the next one.
    pub fn next(&mut self, context: &StatusContext) -> String {
        let line = context.render(self.templates[self.cycle_index]);
        self.cycle_index = (self.cycle_index + 1) % self.templates.len();
        line
    }
}

impl Default for StatusRotator {
    fn default() -> Self {
        Self::new(Template::ALL.to_vec())
    }
}
