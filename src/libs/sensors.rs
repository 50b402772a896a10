//! Sensor sources.
//!
//! A [`SensorSource`] produces one [`Reading`] per call. Real hardware can
//! hang, so the engine is normally given a [`BoundedSensor`], which runs the
//! inner source on a worker thread and gives up after a fixed timeout.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use studydesk::libs::sensors::{BoundedSensor, SensorSource, SimulatedSensor};
//!
//! let mut sensor = BoundedSensor::spawn(SimulatedSensor::new(), Duration::from_secs(2));
//! let reading = sensor.acquire();
//! ```

use crate::libs::error::AcquisitionError;
use crate::libs::messages::Message;
use crate::libs::sample::Reading;
use crate::{msg_debug, msg_warning};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Supply voltage of the light-sensor ADC.
const ADC_REFERENCE_VOLTS: f64 = 3.3;
/// Full-scale value of the 8-bit ADC.
const ADC_FULL_SCALE: f64 = 255.0;
/// Lux per volt of the photoresistor divider.
const LUX_PER_VOLT: f64 = 1000.0 / ADC_REFERENCE_VOLTS;

pub trait SensorSource: Send {
    fn acquire(&mut self) -> Result<Reading, AcquisitionError>;
}

/// Closures work as ad hoc sources.
impl<F> SensorSource for F
where
    F: FnMut() -> Result<Reading, AcquisitionError> + Send,
{
    fn acquire(&mut self) -> Result<Reading, AcquisitionError> {
        self()
    }
}

/// Converts a raw 8-bit light-sensor value to lux.
pub fn lux_from_adc(raw: u8) -> f64 {
    let volts = f64::from(raw) * ADC_REFERENCE_VOLTS / ADC_FULL_SCALE;
    volts * LUX_PER_VOLT
}

/// Deterministic stand-in for the desk sensors.
///
/// Temperature and humidity drift slowly around a base value, and light is
/// produced as a raw ADC value and converted the same way the hardware
/// reading would be. Optionally fails every n-th read.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    reads: u64,
    base_temperature_c: f64,
    base_humidity_pct: f64,
    fail_every: Option<u64>,
}

impl SimulatedSensor {
    pub fn new() -> Self {
        Self {
            reads: 0,
            base_temperature_c: 23.0,
            base_humidity_pct: 45.0,
            fail_every: None,
        }
    }

    pub fn with_base(mut self, temperature_c: f64, humidity_pct: f64) -> Self {
        self.base_temperature_c = temperature_c;
        self.base_humidity_pct = humidity_pct;
        self
    }

    /// Makes every `every`-th read fail. Zero disables failures.
    pub fn failing_every(mut self, every: u64) -> Self {
        self.fail_every = (every > 0).then_some(every);
        self
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for SimulatedSensor {
    fn acquire(&mut self) -> Result<Reading, AcquisitionError> {
        self.reads += 1;
        if let Some(every) = self.fail_every {
            if self.reads % every == 0 {
                return Err(AcquisitionError::Sensor(format!("checksum mismatch on read {}", self.reads)));
            }
        }

        let phase = self.reads as f64 * 0.1;
        let raw_light = 90 + (self.reads * 7 % 60) as u8;

        Ok(Reading {
            temperature_c: self.base_temperature_c + phase.sin() * 1.5,
            humidity_pct: self.base_humidity_pct + phase.cos() * 5.0,
            lux: lux_from_adc(raw_light),
        })
    }
}

type Reply = (u64, Result<Reading, AcquisitionError>);

/// Runs a source on its own thread and bounds every read by a timeout.
///
/// A read that misses the deadline yields [`AcquisitionError::Timeout`] and
/// stays outstanding. At most one request is in flight: while the worker is
/// stuck, later calls wait on that request instead of queueing new ones, and
/// its late answer is discarded once it arrives.
pub struct BoundedSensor {
    requests: Sender<u64>,
    replies: Receiver<Reply>,
    timeout: Duration,
    next_request: u64,
    outstanding: Option<u64>,
}

impl BoundedSensor {
    pub fn spawn<S>(mut source: S, timeout: Duration) -> Self
    where
        S: SensorSource + 'static,
    {
        let (requests, request_rx) = mpsc::channel::<u64>();
        let (reply_tx, replies) = mpsc::channel::<Reply>();

        // The worker ends once the requests sender is dropped.
        let spawned = thread::Builder::new()
            .name("sensor-worker".to_string())
            .spawn(move || {
                while let Ok(id) = request_rx.recv() {
                    let result = source.acquire();
                    if reply_tx.send((id, result)).is_err() {
                        break;
                    }
                }
                msg_debug!(Message::SensorWorkerStopped);
            });
        if let Err(e) = spawned {
            msg_warning!(Message::AcquisitionFailed(e.to_string()));
        }

        Self {
            requests,
            replies,
            timeout,
            next_request: 0,
            outstanding: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Waits until `deadline` for the reply to request `id`, skipping
    /// replies to earlier requests.
    fn wait_for(&self, id: u64, deadline: Instant) -> Result<Result<Reading, AcquisitionError>, AcquisitionError> {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.replies.recv_timeout(remaining) {
                Ok((reply_id, result)) if reply_id == id => return Ok(result),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) => return Err(AcquisitionError::Timeout(self.timeout)),
                Err(RecvTimeoutError::Disconnected) => return Err(AcquisitionError::Disconnected),
            }
        }
    }
}

impl SensorSource for BoundedSensor {
    fn acquire(&mut self) -> Result<Reading, AcquisitionError> {
        let deadline = Instant::now() + self.timeout;

        if let Some(stuck) = self.outstanding {
            // Stale result, the caller already saw a timeout for it.
            self.wait_for(stuck, deadline)?;
            self.outstanding = None;
        }

        self.next_request += 1;
        let id = self.next_request;
        self.requests.send(id).map_err(|_| AcquisitionError::Disconnected)?;
        self.outstanding = Some(id);

        let result = self.wait_for(id, deadline)?;
        self.outstanding = None;
        result
    }
}
