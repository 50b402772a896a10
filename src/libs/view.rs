use crate::db::readings::StoredReading;
use crate::libs::engine::{EngineEvent, SessionState};
use crate::libs::formatter::{format_clock, format_decimal, format_optional};
use crate::libs::messages::{wrap_msg, Message};
use crate::libs::sample::{Averages, Sample};
use crate::libs::summary::SummaryReport;
use crate::{msg_print, msg_warning};
use chrono::Local;
use parking_lot::Mutex;
use prettytable::{row, Table};
use std::sync::Arc;
use std::time::Duration;

/// Everything a display needs for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: SessionState,
    pub stopped: bool,
    pub sample: Option<Sample>,
    pub averages: Option<Averages>,
    pub elapsed: Duration,
    pub break_remaining: Option<Duration>,
    pub break_progress: u32,
    pub break_cap: u32,
    pub message: String,
    pub sensor_warning: Option<String>,
}

/// Receives a frame on every tick and every event as it happens.
pub trait PresentationSink: Send {
    fn render(&mut self, frame: &Frame);
    fn notify(&mut self, event: &EngineEvent);
}

/// Terminal presenter used by `watch`.
///
/// Prints a status line only when its content changes, prefixed with a
/// 12-hour wall clock.
#[derive(Debug, Default)]
pub struct ConsoleView {
    last_line: Option<String>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    fn status_line(frame: &Frame) -> String {
        let mut line = match frame.state {
            SessionState::Idle => frame.message.clone(),
            SessionState::Active => format!(
                "[{}] {} | break {}/{}",
                format_clock(frame.elapsed),
                frame.message,
                frame.break_progress,
                frame.break_cap
            ),
            SessionState::OnBreak => format!(
                "[{}] {} | back in {}",
                format_clock(frame.elapsed),
                frame.message,
                format_clock(frame.break_remaining.unwrap_or_default())
            ),
        };
        if let Some(sample) = &frame.sample {
            if frame.state != SessionState::Idle {
                line.push_str(&format!(
                    " | {}C {}% {} lux",
                    format_decimal(sample.temperature_c),
                    format_decimal(sample.humidity_pct),
                    format_decimal(sample.lux)
                ));
            }
        }
        line
    }
}

impl PresentationSink for ConsoleView {
    fn render(&mut self, frame: &Frame) {
        let line = Self::status_line(frame);
        if self.last_line.as_deref() == Some(line.as_str()) {
            return;
        }
        msg_print!(format!("{} {}", Local::now().format("%I:%M:%S %p"), line));
        if let Some(warning) = &frame.sensor_warning {
            msg_warning!(warning);
        }
        self.last_line = Some(line);
    }

    fn notify(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::Suggestions(suggestions) => View::suggestions(suggestions),
            EngineEvent::SessionEnded(report) => View::summary(report),
            _ => {}
        }
    }
}

/// Presenter that keeps every frame and event in memory.
///
/// Clones share storage, so one clone can be handed to the engine while the
/// other is inspected.
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    frames: Arc<Mutex<Vec<Frame>>>,
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().clone()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.frames.lock().last().cloned()
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().clone()
    }
}

impl PresentationSink for RecordingView {
    fn render(&mut self, frame: &Frame) {
        self.frames.lock().push(frame.clone());
    }

    fn notify(&mut self, event: &EngineEvent) {
        self.events.lock().push(event.clone());
    }
}

pub struct View {}

impl View {
    pub fn summary(report: &SummaryReport) {
        msg_print!(wrap_msg(Message::SummaryHeader));

        let mut table = Table::new();
        table.add_row(row!["METRIC", "AVERAGE"]);
        table.add_row(row!["Total time", report.elapsed_clock()]);
        for (label, value, unit) in report.metric_rows() {
            let value = match value {
                Some(value) => format!("{}{}", format_decimal(value), unit),
                None => format_optional(None),
            };
            table.add_row(row![label, value]);
        }
        table.add_row(row!["Readings", report.samples]);
        table.printstd();

        for advisory in &report.advisories {
            msg_print!(advisory);
        }
        msg_print!(Message::Goodbye);
    }

    pub fn suggestions(suggestions: &[String]) {
        msg_print!(Message::SuggestionsHeader);
        for suggestion in suggestions {
            msg_print!(format!("  - {}", suggestion));
        }
    }

    pub fn readings(readings: &[StoredReading]) {
        let mut table = Table::new();
        table.add_row(row!["ID", "RECORDED AT", "TEMP (C)", "HUMIDITY (%)", "LUX"]);
        for reading in readings {
            table.add_row(row![
                reading.id,
                reading.recorded_at.format("%Y-%m-%d %I:%M:%S %p"),
                format_decimal(reading.temperature_c),
                format_decimal(reading.humidity_pct),
                format_decimal(reading.lux)
            ]);
        }
        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(state: SessionState, message: &str) -> Frame {
        Frame {
            state,
            stopped: false,
            sample: None,
            averages: None,
            elapsed: Duration::from_secs(65),
            break_remaining: Some(Duration::from_secs(30)),
            break_progress: 12,
            break_cap: 100,
            message: message.to_string(),
            sensor_warning: None,
        }
    }

    #[test]
    fn status_line_depends_on_state() {
        assert_eq!(ConsoleView::status_line(&frame(SessionState::Idle, "Sleeping..")), "Sleeping..");
        assert_eq!(
            ConsoleView::status_line(&frame(SessionState::Active, "Session: 01:05")),
            "[01:05] Session: 01:05 | break 12/100"
        );
        assert_eq!(
            ConsoleView::status_line(&frame(SessionState::OnBreak, "On Break Relax...")),
            "[01:05] On Break Relax... | back in 00:30"
        );
    }

    #[test]
    fn recording_view_shares_storage_between_clones() {
        let view = RecordingView::new();
        let mut handle = view.clone();
        handle.render(&frame(SessionState::Idle, "Sleeping."));
        handle.notify(&EngineEvent::Activated);
        assert_eq!(view.frames().len(), 1);
        assert_eq!(view.events(), vec![EngineEvent::Activated]);
    }
}
