//! # Studydesk - study session and desk conditions monitor
//!
//! A command-line companion for a study desk: motion at the desk starts a
//! session, temperature, humidity and light are sampled while it runs,
//! breaks are scheduled automatically, and a summary with comfort advice is
//! printed when the desk goes idle.
//!
//! ## Features
//!
//! - **Session Engine**: Idle / Active / OnBreak state machine driven by ticks and motion
//! - **Sampling**: Bounded sensor reads with running averages and live suggestions
//! - **Persistence**: Readings stored in a local SQLite database
//! - **Reporting**: End-of-session summary with comfort advisories
//!
//! ## Usage
//!
//! ```rust,no_run
//! use studydesk::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
