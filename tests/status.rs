#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};
    use studydesk::libs::clock::{Clock, ManualClock, SystemClock};
    use studydesk::libs::formatter::{format_clock, format_optional, PLACEHOLDER};
    use studydesk::libs::rotator::{StatusContext, StatusRotator, Template};
    use studydesk::libs::sample::{Averages, Reading, Sample};

    #[test]
    fn test_manual_clock_only_moves_on_advance() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        let later = clock.advance(Duration::from_secs(5));
        assert_eq!(later - start, Duration::from_secs(5));
        assert_eq!(clock.now(), later);
        assert_eq!(clock.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let first = clock.now();
        assert!(clock.now() >= first);
    }

    #[test]
    fn test_clock_format_pads_minutes_and_seconds() {
        assert_eq!(format_clock(Duration::ZERO), "00:00");
        assert_eq!(format_clock(Duration::from_secs(59)), "00:59");
        assert_eq!(format_clock(Duration::from_secs(61)), "01:01");
        assert_eq!(format_clock(Duration::from_secs(75 * 60 + 3)), "75:03");
        assert_eq!(format_clock(Duration::from_millis(1999)), "00:01");
    }

    #[test]
    fn test_optional_values_degrade_to_placeholder() {
        assert_eq!(format_optional(Some(22.44)), "22.4");
        assert_eq!(format_optional(None), PLACEHOLDER);
    }

    #[test]
    fn test_rotator_visits_each_template_once_then_wraps() {
        let mut rotator = StatusRotator::default();
        let context = StatusContext {
            elapsed: Duration::from_secs(192),
            ..Default::default()
        };

        let lines: Vec<String> = (0..rotator.len() + 1).map(|_| rotator.next(&context)).collect();
        assert_eq!(lines[0], "Session: 03:12");
        assert!(lines[1].starts_with("Temp:"));
        assert!(lines[2].starts_with("Humidity:"));
        assert!(lines[3].starts_with("Lux:"));
        assert_eq!(lines[4], lines[0]);
        assert_eq!(rotator.cycle_index(), 1);
    }

    #[test]
    fn test_rotator_renders_placeholders_without_data() {
        let mut rotator = StatusRotator::new(vec![Template::Temperature]);
        assert_eq!(rotator.next(&StatusContext::default()), "Temp: --C (avg --C)");
    }

    #[test]
    fn test_rotator_renders_sample_and_average() {
        let sample = Sample::new(
            Reading {
                temperature_c: 22.4,
                humidity_pct: 45.0,
                lux: 350.25,
            },
            Instant::now(),
        );
        let averages = Averages {
            temperature_c: 22.1,
            humidity_pct: 44.8,
            lux: 349.9,
        };
        let context = StatusContext {
            elapsed: Duration::ZERO,
            sample: Some(&sample),
            averages: Some(&averages),
        };
        let mut rotator = StatusRotator::new(vec![Template::Temperature, Template::Humidity]);
        assert_eq!(rotator.next(&context), "Temp: 22.4C (avg 22.1C)");
        assert_eq!(rotator.next(&context), "Humidity: 45.0% (avg 44.8%)");
    }

    #[test]
    #[should_panic]
    fn test_rotator_rejects_an_empty_template_list() {
        StatusRotator::new(Vec::new());
    }
}
