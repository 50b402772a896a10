//! Display implementation for studydesk application messages.
//!
//! Every user-facing string lives here, so the engine, the drivers and the
//! CLI all speak with one voice. Message categories:
//!
//! - **Session Messages**: activation, idle timeout and shutdown
//! - **Break Messages**: break lifecycle and rejected transitions
//! - **Sensor Messages**: readings, acquisition and persistence failures
//! - **Summary Messages**: the end-of-session report lines
//! - **Configuration Messages**: setup wizard and validation
//! - **Watch Messages**: the interactive event loop
//!
//! ```rust
//! use studydesk::libs::messages::Message;
//!
//! assert_eq!(Message::BreakStarted.to_string(), "Break Started!");
//! ```

use super::types::Message;
use crate::libs::formatter::format_decimal;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            // === SESSION MESSAGES ===
            Message::Welcome => "Welcome! Sensors Active".to_string(),
            Message::SessionActivated => "System activated.".to_string(),
            Message::MotionIdleTimerReset => "Motion detected. Idle timer reset.".to_string(),
            Message::GoingIdle(secs) => format!("No motion detected for {} seconds. Going idle.", secs),
            Message::SessionEndedByShutdown => "Session ended by shutdown.".to_string(),
            Message::IdleFrame(dots) => format!("Sleeping{}", ".".repeat(*dots)),
            Message::Goodbye => "Goodbye!".to_string(),

            // === BREAK MESSAGES ===
            Message::BreakStarted => "Break Started!".to_string(),
            Message::BreakEnded => "Break Ended!".to_string(),
            Message::OnBreak => "On Break Relax...".to_string(),
            Message::BreakScheduled => "Break time reached, starting a break.".to_string(),
            Message::InvalidTransition { action, state } => {
                format!("Cannot {} while the session is {}", action, state)
            }

            // === SENSOR MESSAGES ===
            Message::SensorReading {
                temperature_c,
                humidity_pct,
                lux,
            } => format!(
                "Sensor Data - Temp: {:.1}C, Humidity: {:.1}%, Lux: {:.1}",
                temperature_c, humidity_pct, lux
            ),
            Message::AcquisitionFailed(error) => format!("Sensor read failed: {}", error),
            Message::SensorWarning(count) => format!("Sensor unavailable: {} consecutive failed readings", count),
            Message::SensorWorkerStopped => "Sensor worker thread stopped".to_string(),
            Message::PersistenceFailed(error) => format!("Failed to store reading: {}", error),

            // === SUMMARY MESSAGES ===
            Message::SummaryHeader => "Study Session Summary".to_string(),
            Message::SummaryTotalTime(minutes, seconds) => format!("Total Time: {} min {} sec", minutes, seconds),
            Message::SummaryAverage { label, value, unit } => match value {
                Some(value) => format!("{} Avg: {}{}", label, format_decimal(*value), unit),
                None => format!("{} Avg: no data", label),
            },

            // === SUGGESTION MESSAGES ===
            Message::SuggestionsHeader => "Suggestions:".to_string(),
            Message::NoSuggestions => "Conditions look good, nothing to suggest.".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDefaultsSaved => "Default configuration saved".to_string(),
            Message::ConfigModuleEngine => "Session engine settings".to_string(),

            // === WATCH/EVENT LOOP MESSAGES ===
            Message::WatchStarted {
                sample_interval,
                idle_timeout,
                break_duration,
            } => format!(
                "Watching the desk: sampling every {}s, idle after {}s, breaks last {}s",
                sample_interval, idle_timeout, break_duration
            ),
            Message::WatchControls => "Press Enter when at the desk, 'b' to take a break, 'e' to end it, 'q' to quit".to_string(),
            Message::WatchShuttingDown => "Shutting down...".to_string(),
            Message::WatchReceivedCtrlC => "Received Ctrl+C".to_string(),
            Message::WatchCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatchUnknownInput(input) => format!("Unknown input '{}'", input),
            Message::WatchStdinClosed => "Input closed, motion now comes from simulation only".to_string(),
            Message::EventLoopExitedNormally => "Event loop exited normally".to_string(),
            Message::EventLoopError(error) => format!("Event loop error: {}", error),
            Message::EventLoopPanicked(error) => format!("Event loop task panicked: {}", error),
            Message::EngineStopped => "Session engine stopped".to_string(),

            // === READINGS MESSAGES ===
            Message::ReadingsHeader(count) => format!("Latest {} readings", count),
            Message::NoReadingsFound => "No readings stored yet".to_string(),
            Message::DbConnectionFailed => "Failed to connect to database".to_string(),

            // === PROMPTS ===
            Message::PromptSampleInterval => "Enter sample interval (seconds)".to_string(),
            Message::PromptIdleTimeout => "Enter idle timeout (seconds)".to_string(),
            Message::PromptBreakDuration => "Enter break duration (seconds)".to_string(),
            Message::PromptBreakStep => "Enter break progress step per tick".to_string(),
            Message::PromptTickInterval => "Enter tick interval (milliseconds)".to_string(),
            Message::PromptSensorTimeout => "Enter sensor timeout (milliseconds)".to_string(),
        };
        write!(f, "{}", s)
    }
}
