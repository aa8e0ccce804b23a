// tests/gate/config_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use slide_gate::{ConfigError, Gate, GateConfig, GlobalKey};
    use std::time::Duration;

    // Config validation tests
    #[test]
    fn config_defaults_match_documented_values() {
        let config = GateConfig::default();
        let gate = Gate::<()>::new(config).unwrap();
        assert_eq!(gate.calls(), 1);
        assert_eq!(gate.period(), Duration::from_secs(60));
        assert!(!gate.auto_retry());
        assert_eq!(gate.max_retries(), 3);
    }

    #[test]
    fn config_rejects_zero_calls() {
        let config = GateConfig::new(0, 1.0);
        let result = config.validate();
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidCalls));
    }

    #[test]
    fn config_rejects_zero_period() {
        let config = GateConfig::new(1, 0.0);
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidPeriod
        ));
    }

    #[test]
    fn config_rejects_negative_period() {
        let config = GateConfig::new(1, -1.0);
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidPeriod
        ));
    }

    #[test]
    fn config_rejects_non_finite_period() {
        for period in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = GateConfig::new(1, period);
            assert!(
                matches!(config.validate().unwrap_err(), ConfigError::InvalidPeriod),
                "period {period} should be rejected"
            );
        }
    }

    #[test]
    fn config_accepts_valid_parameters() {
        let config = GateConfig::new(10, 0.5).auto_retry(true).max_retries(0);
        assert!(config.validate().is_ok());
    }

    // Test config builder pattern
    #[test]
    fn config_builder_pattern_works() {
        let config = GateConfig::new(0, 0.0)
            .calls(5)
            .period_duration(Duration::from_millis(250))
            .auto_retry(true)
            .max_retries(7);

        let gate = Gate::<()>::new(config).unwrap();
        assert_eq!(gate.calls(), 5);
        assert_eq!(gate.period(), Duration::from_millis(250));
        assert!(gate.auto_retry());
        assert_eq!(gate.max_retries(), 7);
    }

    // Constructor tests with config
    #[test]
    fn constructor_with_invalid_config_fails() {
        let clock = TestClock::new(0.0);
        let result =
            Gate::<(), GlobalKey, TestClock>::with_clock(GateConfig::new(0, 1.0), clock.clone());
        assert!(matches!(result.err(), Some(ConfigError::InvalidCalls)));

        let result =
            Gate::<(), GlobalKey, TestClock>::with_clock(GateConfig::new(1, -0.5), clock);
        assert!(matches!(result.err(), Some(ConfigError::InvalidPeriod)));
    }

    #[test]
    fn config_is_kept_as_given() {
        let config = GateConfig::new(3, 2.0).auto_retry(true);
        let gate: Gate<(), GlobalKey, TestClock> =
            Gate::with_clock(config.clone(), TestClock::new(0.0)).unwrap();
        assert_eq!(gate.config(), &config);
    }

    #[test]
    fn config_error_messages() {
        assert_eq!(ConfigError::InvalidCalls.to_string(), "calls must be at least 1");
        assert!(ConfigError::InvalidPeriod.to_string().contains("period"));
    }
}
