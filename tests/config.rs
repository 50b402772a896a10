#[cfg(test)]
mod tests {
    use parking_lot::{Mutex, MutexGuard};
    use studydesk::libs::config::{Config, EngineConfig, CONFIG_FILE_NAME};
    use studydesk::libs::data_storage::DataStorage;
    use studydesk::libs::error::ConfigError;
    use studydesk::libs::suggestion::{Band, Thresholds};
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static HOME_LOCK: Mutex<()> = Mutex::new(());

    /// Points the data directory at a fresh temporary home for each test.
    struct ConfigTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = HOME_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.engine_or_default(), EngineConfig::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_round_trip(_ctx: &mut ConfigTestContext) {
        let config = Config {
            engine: Some(EngineConfig {
                idle_timeout_secs: 20,
                break_duration_secs: 5,
                ..Default::default()
            }),
        };
        config.save().unwrap();

        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        assert!(path.exists());
        assert_eq!(Config::read().unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_hand_edited_file_keeps_defaults_for_missing_keys(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, r#"{ "engine": { "sample_interval_secs": 2, "break_cap": 10 } }"#).unwrap();

        let engine = Config::read().unwrap().engine_or_default();
        assert_eq!(engine.sample_interval_secs, 2);
        assert_eq!(engine.break_cap, 10);
        assert_eq!(engine.idle_timeout_secs, 90);
        assert_eq!(engine.comfort_thresholds, Thresholds::comfort());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_corrupted_file_is_an_error(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::read().is_err());
    }

    #[test]
    fn test_validation_names_the_offending_key() {
        let config = EngineConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "tick_interval_ms"),
            other => panic!("unexpected validation result: {:?}", other),
        }

        let mut config = EngineConfig::default();
        config.live_thresholds.temperature_c = Band::new(30.0, 18.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.sample_interval(), Duration::from_secs(5));
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let config = EngineConfig {
            sample_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                key: "sample_interval_secs".to_string(),
                message: "must be greater than zero".to_string(),
            })
        );

        let config = EngineConfig {
            failure_warning_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "failure_warning_threshold"
        ));
    }

    #[test]
    fn test_inverted_comfort_band_is_rejected() {
        let mut config = EngineConfig::default();
        config.comfort_thresholds.humidity_pct = Band::new(60.0, 40.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "comfort_thresholds"
        ));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"engine":{"idle_timeout_secs":20}}"#).unwrap();
        let engine = config.engine_or_default();
        assert_eq!(engine.idle_timeout_secs, 20);
        assert_eq!(engine.break_duration_secs, 300);
        assert_eq!(engine.live_thresholds, Thresholds::live());
    }
}
