//! Formatting utilities for durations and sensor values.
//!
//! Used by the status rotator, the session summary and the console view so
//! that every surface shows time and readings the same way.
//!
//! ## Format Specifications
//!
//! - Session time is shown as "MM:SS"; minutes keep growing past 59
//!   ("75:03"), there is no hour field.
//! - Readings are shown with one decimal ("22.4").
//! - A missing value is shown as the placeholder "--".
//!
//! ```rust
//! use studydesk::libs::formatter::{format_clock, format_optional};
//! use std::time::Duration;
//!
//! assert_eq!(format_clock(Duration::from_secs(192)), "03:12");
//! assert_eq!(format_optional(None), "--");
//! ```

use std::time::Duration;

/// Rendered in place of a value that is not available yet.
pub const PLACEHOLDER: &str = "--";

/// Splits a duration into whole minutes and remaining seconds.
///
/// Sub-second parts are truncated.
pub fn split_minutes(duration: Duration) -> (u64, u64) {
    let total = duration.as_secs();
    (total / 60, total % 60)
}

/// Formats a duration as zero-padded "MM:SS".
pub fn format_clock(duration: Duration) -> String {
    let (minutes, seconds) = split_minutes(duration);
    format!("{:02}:{:02}", minutes, seconds)
}

/// Formats a reading with one decimal.
pub fn format_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// Formats an optional reading, falling back to [`PLACEHOLDER`].
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), format_decimal)
}
