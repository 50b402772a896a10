//! The study session state machine.
//!
//! [`SessionEngine`] owns every piece of session state and is driven purely
//! by commands carrying an explicit `now`:
//!
//! ```text
//!            motion                 progress > cap / request_break
//!   Idle ───────────▶ Active ─────────────────────────────────▶ OnBreak
//!    ▲                  │  ▲                                      │
//!    │   idle timeout   │  └──── break expired / end_break_early ─┘
//!    └──────────────────┘
//! ```
//!
//! An active tick runs three steps in order: take a sample when one is due,
//! advance break progress (starting a break once it passes the cap), then
//! check the idle timeout. Break time never counts toward the session's
//! active time.
//!
//! The engine does no I/O itself. Readings come from a [`SensorSource`],
//! samples go to a [`ReadingSink`], and every tick renders a [`Frame`] into a
//! [`PresentationSink`]. Failures of any collaborator are logged and never
//! leave the engine.

use crate::libs::clock::Clock;
use crate::libs::config::EngineConfig;
use crate::libs::error::EngineError;
use crate::libs::messages::Message;
use crate::libs::rotator::{StatusContext, StatusRotator};
use crate::libs::sample::{Accumulator, Averages, Sample};
use crate::libs::sensors::SensorSource;
use crate::libs::sink::ReadingSink;
use crate::libs::suggestion::SuggestionEvaluator;
use crate::libs::summary::SummaryReport;
use crate::libs::view::{Frame, PresentationSink};
use crate::{msg_debug, msg_error, msg_info, msg_warning};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Public view of where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    OnBreak,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Active => "active",
            SessionState::OnBreak => "on break",
        };
        write!(f, "{}", name)
    }
}

/// Start of the session and the break time to subtract from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    start: Instant,
    break_total: Duration,
}

impl SessionClock {
    pub fn start(now: Instant) -> Self {
        Self {
            start: now,
            break_total: Duration::ZERO,
        }
    }

    pub fn started_at(&self) -> Instant {
        self.start
    }

    pub fn break_total(&self) -> Duration {
        self.break_total
    }

    /// Wall time since start minus accumulated break time.
    pub fn active_time(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start).saturating_sub(self.break_total)
    }

    fn add_break(&mut self, span: Duration) {
        self.break_total += span;
    }
}

/// Something observable that happened while handling a command.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Activated,
    BreakStarted,
    BreakEnded,
    SessionEnded(SummaryReport),
    Suggestions(Vec<String>),
    AcquisitionFailed { consecutive: u32, error: String },
    Stopped,
}

/// The external handles the engine talks to.
pub struct Collaborators {
    pub clock: Arc<dyn Clock>,
    pub sensor: Box<dyn SensorSource>,
    pub sink: Box<dyn ReadingSink>,
    pub presenter: Box<dyn PresentationSink>,
}

#[derive(Debug, Clone, Copy)]
struct Session {
    clock: SessionClock,
    last_motion: Instant,
    last_sample_at: Option<Instant>,
    progress: u32,
}

impl Session {
    fn begin(now: Instant) -> Self {
        Self {
            clock: SessionClock::start(now),
            last_motion: now,
            last_sample_at: None,
            progress: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Active(Session),
    OnBreak { session: Session, started: Instant },
}

pub struct SessionEngine {
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    sensor: Box<dyn SensorSource>,
    sink: Box<dyn ReadingSink>,
    presenter: Box<dyn PresentationSink>,
    live: SuggestionEvaluator,
    comfort: SuggestionEvaluator,
    phase: Phase,
    stopped: bool,
    accumulator: Accumulator,
    last_sample: Option<Sample>,
    suggestions: Vec<String>,
    rotator: StatusRotator,
    idle_dots: usize,
    status_message: String,
    acquisition_failures: u32,
    new_data: bool,
    last_summary: Option<SummaryReport>,
}

impl SessionEngine {
    pub fn new(config: EngineConfig, collaborators: Collaborators) -> Self {
        let live = SuggestionEvaluator::live(config.live_thresholds);
        let comfort = SuggestionEvaluator::comfort(config.comfort_thresholds);

        Self {
            config,
            clock: collaborators.clock,
            sensor: collaborators.sensor,
            sink: collaborators.sink,
            presenter: collaborators.presenter,
            live,
            comfort,
            phase: Phase::Idle,
            stopped: false,
            accumulator: Accumulator::new(),
            last_sample: None,
            suggestions: Vec::new(),
            rotator: StatusRotator::default(),
            idle_dots: 0,
            status_message: String::new(),
            acquisition_failures: 0,
            new_data: false,
            last_summary: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reads the engine's own clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    // === COMMANDS ===

    /// Handles a motion pulse.
    ///
    /// Activates an idle engine; otherwise only refreshes the motion
    /// timestamp, so repeated pulses are harmless.
    pub fn on_motion(&mut self, now: Instant) -> Option<EngineEvent> {
        if self.stopped {
            return None;
        }

        match &mut self.phase {
            Phase::Idle => Some(self.activate(now)),
            Phase::Active(session) | Phase::OnBreak { session, .. } => {
                session.last_motion = now;
                msg_debug!(Message::MotionIdleTimerReset);
                None
            }
        }
    }

    /// Advances the engine by one tick and renders a frame.
    pub fn tick(&mut self, now: Instant) -> Option<EngineEvent> {
        if self.stopped {
            self.render(now);
            return None;
        }

        let event = match self.phase {
            Phase::Idle => {
                self.idle_dots = self.idle_dots % 3 + 1;
                self.status_message = Message::IdleFrame(self.idle_dots).to_string();
                None
            }
            Phase::Active(_) => self.tick_active(now),
            Phase::OnBreak { started, .. } => {
                if now.saturating_duration_since(started) >= self.config.break_duration() {
                    Some(self.finish_break(now))
                } else {
                    self.status_message = Message::OnBreak.to_string();
                    None
                }
            }
        };

        self.render(now);
        event
    }

    /// Starts a break on demand. Only valid while active.
    pub fn request_break(&mut self, now: Instant) -> Result<EngineEvent, EngineError> {
        match self.phase {
            Phase::Active(_) if !self.stopped => Ok(self.begin_break(now)),
            _ => Err(self.reject("take a break")),
        }
    }

    /// Ends the current break before it expires. Only valid while on break.
    pub fn end_break_early(&mut self, now: Instant) -> Result<EngineEvent, EngineError> {
        match self.phase {
            Phase::OnBreak { .. } if !self.stopped => Ok(self.finish_break(now)),
            _ => Err(self.reject("end a break")),
        }
    }

    /// Stops the engine, ending a running session with a summary.
    ///
    /// Idempotent: only the first call produces a summary. Afterwards motion
    /// and break commands are ignored and ticks only re-render.
    pub fn shutdown(&mut self) -> Option<SummaryReport> {
        if self.stopped {
            return None;
        }

        let now = self.clock.now();
        let report = match self.phase {
            Phase::Idle => None,
            Phase::Active(_) | Phase::OnBreak { .. } => {
                msg_info!(Message::SessionEndedByShutdown);
                Some(self.finish_session(now))
            }
        };

        self.stopped = true;
        self.status_message = Message::EngineStopped.to_string();
        msg_debug!(Message::EngineStopped);
        self.emit(EngineEvent::Stopped);
        report
    }

    // === QUERIES ===

    pub fn current_state(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Active(_) => SessionState::Active,
            Phase::OnBreak { .. } => SessionState::OnBreak,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn current_sample_snapshot(&self) -> Option<Sample> {
        self.last_sample
    }

    pub fn current_averages_snapshot(&self) -> Option<Averages> {
        self.accumulator.averages()
    }

    pub fn sample_count(&self) -> u64 {
        self.accumulator.count()
    }

    /// Active time of the running session; frozen while on break and zero
    /// when idle.
    pub fn elapsed_active_time(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Idle => Duration::ZERO,
            Phase::Active(session) => session.clock.active_time(now),
            Phase::OnBreak { session, started } => session.clock.active_time(started),
        }
    }

    pub fn break_remaining(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::OnBreak { started, .. } => {
                Some(self.config.break_duration().saturating_sub(now.saturating_duration_since(started)))
            }
            _ => None,
        }
    }

    /// Break progress, clamped to the cap.
    pub fn break_progress(&self) -> u32 {
        match self.phase {
            Phase::Active(session) => session.progress.min(self.config.break_cap),
            _ => 0,
        }
    }

    pub fn session_clock(&self) -> Option<SessionClock> {
        self.session().map(|session| session.clock)
    }

    pub fn last_motion(&self) -> Option<Instant> {
        self.session().map(|session| session.last_motion)
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn current_suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn last_summary(&self) -> Option<&SummaryReport> {
        self.last_summary.as_ref()
    }

    pub fn acquisition_failures(&self) -> u32 {
        self.acquisition_failures
    }

    /// Banner text once reads have failed too many times in a row.
    pub fn sensor_warning(&self) -> Option<String> {
        (self.acquisition_failures > 0 && self.acquisition_failures >= self.config.failure_warning_threshold)
            .then(|| Message::SensorWarning(self.acquisition_failures).to_string())
    }

    /// Returns whether something changed since the last call, and clears the
    /// flag.
    pub fn take_new_data(&mut self) -> bool {
        std::mem::take(&mut self.new_data)
    }

    pub fn frame(&self, now: Instant) -> Frame {
        Frame {
            state: self.current_state(),
            stopped: self.stopped,
            sample: self.last_sample,
            averages: self.accumulator.averages(),
            elapsed: self.elapsed_active_time(now),
            break_remaining: self.break_remaining(now),
            break_progress: self.break_progress(),
            break_cap: self.config.break_cap,
            message: self.status_message.clone(),
            sensor_warning: self.sensor_warning(),
        }
    }

    // === TRANSITIONS ===

    fn activate(&mut self, now: Instant) -> EngineEvent {
        self.accumulator.reset();
        self.last_sample = None;
        self.suggestions.clear();
        self.rotator = StatusRotator::default();
        self.acquisition_failures = 0;
        self.idle_dots = 0;
        self.phase = Phase::Active(Session::begin(now));
        self.status_message = Message::Welcome.to_string();
        self.new_data = true;

        msg_info!(Message::SessionActivated);
        self.emit(EngineEvent::Activated)
    }

    fn tick_active(&mut self, now: Instant) -> Option<EngineEvent> {
        let Phase::Active(mut session) = self.phase else {
            return None;
        };

        if session.last_sample_at.map_or(true, |at| now.saturating_duration_since(at) >= self.config.sample_interval()) {
            session.last_sample_at = Some(now);
            self.phase = Phase::Active(session);
            self.take_sample(now);
        }

        session.progress = session.progress.saturating_add(self.config.break_step);
        self.phase = Phase::Active(session);
        if session.progress > self.config.break_cap {
            msg_info!(Message::BreakScheduled);
            return Some(self.begin_break(now));
        }

        if now.saturating_duration_since(session.last_motion) > self.config.idle_timeout() {
            msg_info!(Message::GoingIdle(self.config.idle_timeout_secs));
            return Some(EngineEvent::SessionEnded(self.finish_session(now)));
        }

        None
    }

    fn take_sample(&mut self, now: Instant) {
        let reading = match self.sensor.acquire() {
            Ok(reading) => reading,
            Err(error) => {
                self.acquisition_failures = self.acquisition_failures.saturating_add(1);
                msg_warning!(Message::AcquisitionFailed(error.to_string()));
                if let Some(warning) = self.sensor_warning() {
                    msg_warning!(warning);
                }
                self.new_data = true;
                self.emit(EngineEvent::AcquisitionFailed {
                    consecutive: self.acquisition_failures,
                    error: error.to_string(),
                });
                return;
            }
        };

        let sample = Sample::new(reading, now);
        self.acquisition_failures = 0;
        self.accumulator.record(&sample);
        self.last_sample = Some(sample);
        msg_debug!(Message::SensorReading {
            temperature_c: sample.temperature_c,
            humidity_pct: sample.humidity_pct,
            lux: sample.lux,
        });

        if let Err(error) = self.sink.record(now, &sample) {
            msg_error!(Message::PersistenceFailed(error.to_string()));
        }

        self.suggestions = self.live.evaluate(sample.temperature_c, sample.humidity_pct, sample.lux);
        if !self.suggestions.is_empty() {
            self.emit(EngineEvent::Suggestions(self.suggestions.clone()));
        }

        let averages = self.accumulator.averages();
        let context = StatusContext {
            elapsed: self.elapsed_active_time(now),
            sample: self.last_sample.as_ref(),
            averages: averages.as_ref(),
        };
        self.status_message = self.rotator.next(&context);
        self.new_data = true;
    }

    fn begin_break(&mut self, now: Instant) -> EngineEvent {
        if let Phase::Active(mut session) = self.phase {
            session.progress = 0;
            self.phase = Phase::OnBreak { session, started: now };
        }
        self.status_message = Message::BreakStarted.to_string();
        self.new_data = true;

        msg_info!(Message::BreakStarted);
        self.emit(EngineEvent::BreakStarted)
    }

    fn finish_break(&mut self, now: Instant) -> EngineEvent {
        if let Phase::OnBreak { mut session, started } = self.phase {
            session.clock.add_break(now.saturating_duration_since(started));
            session.progress = 0;
            session.last_motion = now;
            self.phase = Phase::Active(session);
        }
        self.status_message = Message::BreakEnded.to_string();
        self.new_data = true;

        msg_info!(Message::BreakEnded);
        self.emit(EngineEvent::BreakEnded)
    }

    /// Builds the summary, returns to idle and keeps the report around.
    ///
    /// Statistics stay readable until the next activation resets them.
    fn finish_session(&mut self, now: Instant) -> SummaryReport {
        let elapsed = self.elapsed_active_time(now);
        let report = SummaryReport::build(&self.accumulator, elapsed, &self.comfort);

        self.phase = Phase::Idle;
        self.idle_dots = 0;
        self.status_message = Message::Goodbye.to_string();
        self.new_data = true;
        for line in report.lines() {
            msg_debug!(line);
        }

        self.last_summary = Some(report.clone());
        self.emit(EngineEvent::SessionEnded(report.clone()));
        report
    }

    fn reject(&self, action: &'static str) -> EngineError {
        if self.stopped {
            return EngineError::Stopped;
        }
        let state = self.current_state();
        msg_warning!(Message::InvalidTransition {
            action: action.to_string(),
            state: state.to_string(),
        });
        EngineError::InvalidTransition { action, state }
    }

    fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Active(session) | Phase::OnBreak { session, .. } => Some(session),
        }
    }

    fn emit(&mut self, event: EngineEvent) -> EngineEvent {
        self.presenter.notify(&event);
        event
    }

    fn render(&mut self, now: Instant) {
        let frame = self.frame(now);
        self.presenter.render(&frame);
    }
}

impl Drop for SessionEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
