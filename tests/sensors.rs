#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;
    use studydesk::libs::error::AcquisitionError;
    use studydesk::libs::sample::Reading;
    use studydesk::libs::sensors::{lux_from_adc, BoundedSensor, SensorSource, SimulatedSensor};

    fn reading() -> Reading {
        Reading {
            temperature_c: 21.0,
            humidity_pct: 40.0,
            lux: 300.0,
        }
    }

    #[test]
    fn test_adc_conversion_spans_zero_to_one_thousand_lux() {
        assert_eq!(lux_from_adc(0), 0.0);
        assert!((lux_from_adc(255) - 1000.0).abs() < 1e-9);
        assert!((lux_from_adc(51) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_simulated_sensor_fails_on_schedule() {
        let mut sensor = SimulatedSensor::new().failing_every(3);
        assert!(sensor.acquire().is_ok());
        assert!(sensor.acquire().is_ok());
        assert!(matches!(sensor.acquire(), Err(AcquisitionError::Sensor(_))));
        assert!(sensor.acquire().is_ok());
        assert_eq!(sensor.reads(), 4);
    }

    #[test]
    fn test_simulated_readings_stay_in_plausible_ranges() {
        let mut sensor = SimulatedSensor::new();
        for _ in 0..100 {
            let r = sensor.acquire().unwrap();
            assert!((20.0..=26.0).contains(&r.temperature_c));
            assert!((39.0..=51.0).contains(&r.humidity_pct));
            assert!((0.0..=1000.0).contains(&r.lux));
        }
    }

    #[test]
    fn test_simulated_readings_drift_around_the_base() {
        let mut sensor = SimulatedSensor::new().with_base(30.0, 70.0);
        for _ in 0..50 {
            let r = sensor.acquire().unwrap();
            assert!((28.5..=31.5).contains(&r.temperature_c));
            assert!((65.0..=75.0).contains(&r.humidity_pct));
        }
    }

    #[test]
    fn test_bounded_sensor_passes_readings_through() {
        let mut sensor = BoundedSensor::spawn(|| -> Result<Reading, AcquisitionError> { Ok(reading()) }, Duration::from_secs(1));
        assert_eq!(sensor.timeout(), Duration::from_secs(1));
        assert_eq!(sensor.acquire(), Ok(reading()));
        assert_eq!(sensor.acquire(), Ok(reading()));
    }

    #[test]
    fn test_bounded_sensor_times_out_and_discards_late_replies() {
        let mut calls = 0;
        let source = move || -> Result<Reading, AcquisitionError> {
            calls += 1;
            if calls == 1 {
                thread::sleep(Duration::from_millis(300));
            }
            Ok(Reading {
                temperature_c: calls as f64,
                humidity_pct: 0.0,
                lux: 0.0,
            })
        };
        let mut sensor = BoundedSensor::spawn(source, Duration::from_millis(50));

        assert_eq!(sensor.acquire(), Err(AcquisitionError::Timeout(Duration::from_millis(50))));

        thread::sleep(Duration::from_millis(400));
        let second = sensor.acquire().unwrap();
        assert_eq!(second.temperature_c, 2.0);
    }

    #[test]
    fn test_bounded_sensor_recovers_right_after_a_hang() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let source = move || -> Result<Reading, AcquisitionError> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                thread::sleep(Duration::from_millis(500));
            } else {
                thread::sleep(Duration::from_millis(10));
            }
            Ok(reading())
        };
        let timeout = Duration::from_millis(100);
        let mut sensor = BoundedSensor::spawn(source, timeout);

        // Every call during the hang times out without queueing another read.
        for _ in 0..4 {
            assert_eq!(sensor.acquire(), Err(AcquisitionError::Timeout(timeout)));
        }
        thread::sleep(Duration::from_millis(300));

        for _ in 0..3 {
            assert_eq!(sensor.acquire(), Ok(reading()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_bounded_sensor_reports_errors_from_the_source() {
        let mut sensor = BoundedSensor::spawn(
            || -> Result<Reading, AcquisitionError> { Err(AcquisitionError::Sensor("no response".to_string())) },
            Duration::from_secs(1),
        );
        assert_eq!(sensor.acquire(), Err(AcquisitionError::Sensor("no response".to_string())));
    }
}
