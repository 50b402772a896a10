//! Configuration for the studydesk application.
//!
//! Settings are stored as pretty-printed JSON in the per-user data directory
//! (see [`DataStorage`]). A missing file is not an error: every section is
//! optional and falls back to its defaults.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\studydesk\studydesk\config.json`
//! - **macOS**: `~/Library/Application Support/studydesk/studydesk/config.json`
//! - **Linux**: `~/.local/share/studydesk/studydesk/config.json`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use studydesk::libs::config::Config;
//!
//! let config = Config::read()?;
//! let engine = config.engine_or_default();
//! engine.validate()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::error::ConfigError;
use crate::libs::messages::Message;
use crate::libs::suggestion::Thresholds;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Timing and threshold settings of the session engine.
///
/// Durations are stored as plain integers with the unit in the field name so
/// the JSON file stays easy to edit by hand.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds between sensor samples while a session is active.
    pub sample_interval_secs: u64,

    /// Seconds without motion after which an active session ends.
    pub idle_timeout_secs: u64,

    /// Length of a break in seconds.
    pub break_duration_secs: u64,

    /// Break progress added on every active tick.
    pub break_step: u32,

    /// A break starts once progress exceeds this value.
    pub break_cap: u32,

    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,

    /// Milliseconds a single sensor read may take.
    pub sensor_timeout_ms: u64,

    /// Consecutive failed reads before the sensor warning is shown.
    pub failure_warning_threshold: u32,

    /// Bands for the suggestions shown while sampling.
    pub live_thresholds: Thresholds,

    /// Bands for the advisories in the session summary.
    pub comfort_thresholds: Thresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            sample_interval_secs: 5,
            idle_timeout_secs: 90,
            break_duration_secs: 300,
            break_step: 1,
            break_cap: 100,
            tick_interval_ms: 1000,
            sensor_timeout_ms: 2000,
            failure_warning_threshold: 3,
            live_thresholds: Thresholds::live(),
            comfort_thresholds: Thresholds::comfort(),
        }
    }
}

impl EngineConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn break_duration(&self) -> Duration {
        Duration::from_secs(self.break_duration_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn sensor_timeout(&self) -> Duration {
        Duration::from_millis(self.sensor_timeout_ms)
    }

    /// Rejects values the engine cannot run with.
    ///
    /// Every interval must be positive, progress must actually advance and
    /// every threshold band must have `low <= high`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("sample_interval_secs", self.sample_interval_secs),
            ("idle_timeout_secs", self.idle_timeout_secs),
            ("break_duration_secs", self.break_duration_secs),
            ("break_step", u64::from(self.break_step)),
            ("tick_interval_ms", self.tick_interval_ms),
            ("sensor_timeout_ms", self.sensor_timeout_ms),
            ("failure_warning_threshold", u64::from(self.failure_warning_threshold)),
        ];
        if let Some((key, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        for (key, thresholds) in [("live_thresholds", &self.live_thresholds), ("comfort_thresholds", &self.comfort_thresholds)] {
            if !thresholds.is_ordered() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "every band needs low <= high".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Root of the configuration file.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineConfig>,
}

impl Config {
    /// Loads the configuration, or the defaults when no file exists yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn engine_or_default(&self) -> EngineConfig {
        self.engine.clone().unwrap_or_default()
    }

    /// Interactive setup of the engine settings.
    ///
    /// Current values are offered as defaults. Thresholds are not prompted
    /// for; edit the JSON file to change them.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.engine_or_default();

        msg_print!(Message::ConfigModuleEngine);
        let engine = EngineConfig {
            sample_interval_secs: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSampleInterval.to_string())
                .default(default.sample_interval_secs)
                .interact_text()?,
            idle_timeout_secs: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptIdleTimeout.to_string())
                .default(default.idle_timeout_secs)
                .interact_text()?,
            break_duration_secs: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBreakDuration.to_string())
                .default(default.break_duration_secs)
                .interact_text()?,
            break_step: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBreakStep.to_string())
                .default(default.break_step)
                .interact_text()?,
            tick_interval_ms: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTickInterval.to_string())
                .default(default.tick_interval_ms)
                .interact_text()?,
            sensor_timeout_ms: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSensorTimeout.to_string())
                .default(default.sensor_timeout_ms)
                .interact_text()?,
            ..default
        };
        engine.validate()?;

        config.engine = Some(engine);
        Ok(config)
    }
}
