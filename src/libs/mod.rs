//! Core library modules.
//!
//! - **Engine**: [`engine`] state machine, [`driver`] for shared access and the tokio loop
//! - **Sampling**: [`sensors`], [`sample`] statistics, [`sink`] destinations
//! - **Evaluation**: [`suggestion`] bands, [`summary`] reports, [`rotator`] status lines
//! - **Infrastructure**: [`config`], [`data_storage`], [`clock`], [`error`], [`messages`]
//! - **User Interface**: [`view`] presenters, [`formatter`]
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use studydesk::libs::clock::SystemClock;
//! use studydesk::libs::config::EngineConfig;
//! use studydesk::libs::engine::{Collaborators, SessionEngine};
//! use studydesk::libs::sensors::SimulatedSensor;
//! use studydesk::libs::sink::NullSink;
//! use studydesk::libs::view::ConsoleView;
//!
//! let mut engine = SessionEngine::new(
//!     EngineConfig::default(),
//!     Collaborators {
//!         clock: Arc::new(SystemClock),
//!         sensor: Box::new(SimulatedSensor::new()),
//!         sink: Box::new(NullSink),
//!         presenter: Box::new(ConsoleView::new()),
//!     },
//! );
//! let now = engine.now();
//! engine.on_motion(now);
//! engine.tick(now);
//! ```

pub mod clock;
pub mod config;
pub mod data_storage;
pub mod driver;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod messages;
pub mod rotator;
pub mod sample;
pub mod sensors;
pub mod sink;
pub mod suggestion;
pub mod summary;
pub mod view;
