//! Interactive study session.
//!
//! Wires the engine to a bounded simulated sensor, the SQLite readings table
//! and the console view, then drives it with the tokio event loop. Motion
//! comes from the keyboard (Enter) and, optionally, from a periodic
//! simulated pulse. Ctrl+C ends the session with a summary.

use crate::{
    db::readings::{Readings, SqliteSink},
    libs::{
        clock::{Clock, SystemClock},
        config::Config,
        driver::{EngineCommand, EventLoop, SessionHandle},
        engine::{Collaborators, SessionEngine},
        messages::Message,
        sensors::{BoundedSensor, SimulatedSensor},
        sink::{NullSink, ReadingSink},
        view::ConsoleView,
    },
    msg_error, msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Emit a simulated motion pulse every SECS seconds
    #[arg(long, value_name = "SECS")]
    simulate_motion: Option<u64>,

    /// Make every N-th simulated sensor read fail
    #[arg(long, value_name = "N", default_value_t = 0)]
    fail_every: u64,

    /// Do not store readings in the database
    #[arg(long)]
    no_db: bool,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    let config = Config::read()?.engine_or_default();
    config.validate()?;

    msg_info!(Message::WatchStarted {
        sample_interval: config.sample_interval_secs,
        idle_timeout: config.idle_timeout_secs,
        break_duration: config.break_duration_secs,
    });
    msg_print!(Message::WatchControls);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let sensor = BoundedSensor::spawn(SimulatedSensor::new().failing_every(args.fail_every), config.sensor_timeout());
    let engine = SessionEngine::new(
        config.clone(),
        Collaborators {
            clock,
            sensor: Box::new(sensor),
            sink: reading_sink(args.no_db),
            presenter: Box::new(ConsoleView::new()),
        },
    );

    let handle = SessionHandle::new(engine);
    let (event_loop, commands) = EventLoop::new(handle.clone(), config.tick_interval());

    spawn_input_reader(commands.clone());
    let simulation = args
        .simulate_motion
        .filter(|secs| *secs > 0)
        .map(|secs| tokio::spawn(simulate_motion(commands.clone(), Duration::from_secs(secs))));
    drop(commands);

    let loop_task = tokio::spawn(event_loop.run());

    tokio::select! {
        result = loop_task => {
            match result {
                Ok(Ok(_)) => msg_info!(Message::EventLoopExitedNormally),
                Ok(Err(e)) => msg_error!(Message::EventLoopError(e.to_string())),
                Err(e) => msg_error!(Message::EventLoopPanicked(e.to_string())),
            }
        }
        _ = wait_for_ctrl_c() => {
            msg_info!(Message::WatchShuttingDown);
            handle.shutdown();
        }
    }

    if let Some(simulation) = simulation {
        simulation.abort();
    }
    Ok(())
}

fn reading_sink(no_db: bool) -> Box<dyn ReadingSink> {
    if no_db {
        return Box::new(NullSink);
    }
    match Readings::new() {
        Ok(readings) => Box::new(SqliteSink::new(readings)),
        Err(e) => {
            msg_warning!(format!("{}: {}", Message::DbConnectionFailed, e));
            Box::new(NullSink)
        }
    }
}

/// Maps one line of keyboard input to a command.
pub fn parse_input(line: &str) -> Option<EngineCommand> {
    match line.trim().to_lowercase().as_str() {
        "" | "m" => Some(EngineCommand::Motion),
        "b" => Some(EngineCommand::BreakRequest),
        "e" => Some(EngineCommand::EndBreak),
        "q" => Some(EngineCommand::Shutdown),
        _ => None,
    }
}

/// Reads stdin on a plain thread so a pending read never holds up runtime
/// shutdown.
fn spawn_input_reader(commands: mpsc::Sender<EngineCommand>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_input(&line) {
                Some(command) => {
                    if commands.blocking_send(command).is_err() {
                        return;
                    }
                }
                None => msg_warning!(Message::WatchUnknownInput(line.trim().to_string())),
            }
        }
        msg_info!(Message::WatchStdinClosed);
    });
}

async fn simulate_motion(commands: mpsc::Sender<EngineCommand>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        if commands.send(EngineCommand::Motion).await.is_err() {
            break;
        }
    }
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => msg_info!(Message::WatchReceivedCtrlC),
        Err(e) => {
            msg_error!(Message::WatchCtrlCListenFailed(e.to_string()));
            std::future::pending::<()>().await;
        }
    }
}
