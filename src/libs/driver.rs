//! Drivers that feed commands into a [`SessionEngine`].
//!
//! [`SessionHandle`] makes the engine shareable: every command takes the
//! engine lock, reads "now" from the engine's clock and runs to completion,
//! so commands are serialized no matter which task issues them. A stop flag
//! is checked before locking, which lets `shutdown` win against a backlog of
//! ticks.
//!
//! [`EventLoop`] is the tokio driver used by `watch`: a tick interval and a
//! command channel multiplexed with `select!`.
//!
//! ```rust,no_run
//! # async fn demo(handle: studydesk::libs::driver::SessionHandle) -> anyhow::Result<()> {
//! use std::time::Duration;
//! use studydesk::libs::driver::{EngineCommand, EventLoop};
//!
//! let (event_loop, commands) = EventLoop::new(handle, Duration::from_secs(1));
//! commands.send(EngineCommand::Motion).await?;
//! let summary = event_loop.run().await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::engine::{EngineEvent, SessionEngine};
use crate::libs::error::EngineError;
use crate::libs::summary::SummaryReport;
use crate::{msg_debug, msg_warning};
use anyhow::Result;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

/// Commands accepted by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Motion,
    Tick,
    BreakRequest,
    EndBreak,
    Shutdown,
}

/// Thread-safe, cloneable access to one engine.
#[derive(Clone)]
pub struct SessionHandle {
    engine: Arc<Mutex<SessionEngine>>,
    stop: Arc<AtomicBool>,
}

impl SessionHandle {
    pub fn new(engine: SessionEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    pub fn motion(&self) -> Option<EngineEvent> {
        if self.is_stopped() {
            return None;
        }
        let mut engine = self.engine.lock();
        let now = engine.now();
        engine.on_motion(now)
    }

    pub fn tick(&self) -> Option<EngineEvent> {
        if self.is_stopped() {
            return None;
        }
        let mut engine = self.engine.lock();
        let now = engine.now();
        engine.tick(now)
    }

    pub fn request_break(&self) -> Result<EngineEvent, EngineError> {
        if self.is_stopped() {
            return Err(EngineError::Stopped);
        }
        let mut engine = self.engine.lock();
        let now = engine.now();
        engine.request_break(now)
    }

    pub fn end_break(&self) -> Result<EngineEvent, EngineError> {
        if self.is_stopped() {
            return Err(EngineError::Stopped);
        }
        let mut engine = self.engine.lock();
        let now = engine.now();
        engine.end_break_early(now)
    }

    /// Raises the stop flag, then shuts the engine down.
    pub fn shutdown(&self) -> Option<SummaryReport> {
        self.stop.store(true, Ordering::SeqCst);
        self.engine.lock().shutdown()
    }

    /// Runs a read-only query against the engine.
    pub fn inspect<R>(&self, query: impl FnOnce(&SessionEngine) -> R) -> R {
        query(&self.engine.lock())
    }

    /// Routes one command. Shutdown is left to the caller.
    pub fn dispatch(&self, command: EngineCommand) -> Option<EngineEvent> {
        match command {
            EngineCommand::Motion => self.motion(),
            EngineCommand::Tick => self.tick(),
            EngineCommand::BreakRequest => self.request_break().map_err(|e| msg_warning!(e)).ok(),
            EngineCommand::EndBreak => self.end_break().map_err(|e| msg_warning!(e)).ok(),
            EngineCommand::Shutdown => self.shutdown().map(EngineEvent::SessionEnded),
        }
    }
}

/// Tick timer plus command channel.
pub struct EventLoop {
    handle: SessionHandle,
    commands: mpsc::Receiver<EngineCommand>,
    tick_interval: Duration,
}

impl EventLoop {
    const CHANNEL_CAPACITY: usize = 64;

    pub fn new(handle: SessionHandle, tick_interval: Duration) -> (Self, mpsc::Sender<EngineCommand>) {
        let (sender, commands) = mpsc::channel(Self::CHANNEL_CAPACITY);
        let event_loop = Self {
            handle,
            commands,
            tick_interval,
        };
        (event_loop, sender)
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Runs until a shutdown command arrives, every sender is dropped, or the
    /// handle is stopped from elsewhere. Returns the final summary if a
    /// session was still running.
    pub async fn run(mut self) -> Result<Option<SummaryReport>> {
        let mut ticker = time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if self.handle.is_stopped() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    // Sensor reads may block up to their timeout.
                    let handle = self.handle.clone();
                    tokio::task::spawn_blocking(move || handle.tick()).await?;
                }
                command = self.commands.recv() => match command {
                    Some(EngineCommand::Shutdown) | None => break,
                    Some(command) => {
                        msg_debug!(format!("Command: {:?}", command));
                        self.handle.dispatch(command);
                    }
                }
            }
        }

        Ok(self.handle.shutdown())
    }
}
