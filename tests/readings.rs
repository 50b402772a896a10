#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use parking_lot::{Mutex, MutexGuard};
    use std::time::{Duration, Instant};
    use studydesk::db::readings::{Readings, SqliteSink};
    use studydesk::libs::sample::{Reading, Sample};
    use studydesk::libs::sink::ReadingSink;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static HOME_LOCK: Mutex<()> = Mutex::new(());

    struct ReadingsTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
        readings: Readings,
    }

    impl TestContext for ReadingsTestContext {
        fn setup() -> Self {
            let guard = HOME_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            let readings = Readings::new().unwrap();
            ReadingsTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
                readings,
            }
        }
    }

    fn reading(temperature_c: f64) -> Reading {
        Reading {
            temperature_c,
            humidity_pct: 45.5,
            lux: 320.0,
        }
    }

    #[test_context(ReadingsTestContext)]
    #[test]
    fn test_empty_table(ctx: &mut ReadingsTestContext) {
        assert_eq!(ctx.readings.count().unwrap(), 0);
        assert!(ctx.readings.latest(10).unwrap().is_empty());
    }

    #[test_context(ReadingsTestContext)]
    #[test]
    fn test_latest_returns_newest_first(ctx: &mut ReadingsTestContext) {
        let at = Local::now().naive_local();
        for temperature in [20.0, 21.0, 22.0] {
            ctx.readings.insert(at, &reading(temperature)).unwrap();
        }

        let latest = ctx.readings.latest(2).unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].temperature_c, 22.0);
        assert_eq!(latest[1].temperature_c, 21.0);
        assert_eq!(latest[0].humidity_pct, 45.5);
        assert_eq!(ctx.readings.count().unwrap(), 3);
    }

    #[test_context(ReadingsTestContext)]
    #[test]
    fn test_sink_maps_instants_to_wall_time(ctx: &mut ReadingsTestContext) {
        let anchor_instant = Instant::now();
        let anchor_wall = Local.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        let mut sink = SqliteSink::with_anchor(ctx.readings.clone(), anchor_instant, anchor_wall);

        let taken = anchor_instant + Duration::from_secs(95);
        sink.record(taken, &Sample::new(reading(23.5), taken)).unwrap();

        let stored = ctx.readings.latest(1).unwrap();
        assert_eq!(stored[0].recorded_at, (anchor_wall + chrono::TimeDelta::seconds(95)).naive_local());
        assert_eq!(stored[0].temperature_c, 23.5);
        assert_eq!(stored[0].lux, 320.0);
    }
}
