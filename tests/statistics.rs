#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};
    use studydesk::libs::sample::{Accumulator, Reading, Sample};
    use studydesk::libs::suggestion::{SuggestionEvaluator, Thresholds};
    use studydesk::libs::summary::SummaryReport;

    fn sample(temperature_c: f64, humidity_pct: f64, lux: f64) -> Sample {
        Sample::new(
            Reading {
                temperature_c,
                humidity_pct,
                lux,
            },
            Instant::now(),
        )
    }

    fn comfort() -> SuggestionEvaluator {
        SuggestionEvaluator::comfort(Thresholds::comfort())
    }

    #[test]
    fn test_empty_accumulator_has_no_averages() {
        let acc = Accumulator::new();
        assert_eq!(acc.count(), 0);
        assert!(acc.averages().is_none());
    }

    #[test]
    fn test_averages_are_arithmetic_means() {
        let mut acc = Accumulator::new();
        acc.record(&sample(20.0, 40.0, 300.0));
        acc.record(&sample(22.0, 50.0, 500.0));
        acc.record(&sample(27.0, 63.0, 100.0));

        let avg = acc.averages().unwrap();
        assert_eq!(acc.count(), 3);
        assert!((avg.temperature_c - 23.0).abs() < 1e-9);
        assert!((avg.humidity_pct - 51.0).abs() < 1e-9);
        assert!((avg.lux - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_totals_and_count() {
        let mut acc = Accumulator::new();
        acc.record(&sample(20.0, 40.0, 300.0));
        acc.reset();
        assert_eq!(acc, Accumulator::new());
        assert!(acc.averages().is_none());
    }

    #[test]
    fn test_sample_keeps_its_reading() {
        let s = sample(21.5, 45.0, 320.0);
        assert_eq!(s.reading().temperature_c, 21.5);
        assert_eq!(s.reading().lux, 320.0);
    }

    #[test]
    fn test_empty_session_reports_no_data() {
        let report = SummaryReport::build(&Accumulator::new(), Duration::from_secs(75), &comfort());
        assert!(!report.has_data());
        assert_eq!(report.samples, 0);
        assert!(report.advisories.is_empty());
        assert_eq!(
            report.lines(),
            vec![
                "Study Session Summary",
                "Total Time: 1 min 15 sec",
                "Temp Avg: no data",
                "Humidity Avg: no data",
                "Lux Avg: no data",
                "Goodbye!",
            ]
        );
    }

    #[test]
    fn test_averages_and_comfort_advisories_are_reported() {
        let mut acc = Accumulator::new();
        acc.record(&sample(27.0, 50.0, 400.0));

        let report = SummaryReport::build(&acc, Duration::from_secs(130), &comfort());
        assert_eq!(report.elapsed_clock(), "02:10");
        assert_eq!(report.samples, 1);
        assert_eq!(report.advisories, vec!["The room ran warm; cool it down before the next session"]);

        let lines = report.lines();
        assert_eq!(lines[2], "Temp Avg: 27.0C");
        assert_eq!(lines[3], "Humidity Avg: 50.0%");
        assert_eq!(lines[4], "Lux Avg: 400.0");
        assert_eq!(lines[5], "The room ran warm; cool it down before the next session");
        assert_eq!(lines.last().map(String::as_str), Some("Goodbye!"));
    }
}
