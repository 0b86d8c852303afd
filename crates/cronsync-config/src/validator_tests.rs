
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_empty_group() {
        let mut config = Config::default();
        config.scheduler.group = "  ".to_string();

        let result = ConfigValidator::validate(&config);
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "scheduler.group"));
    }

    #[test]
    fn test_validate_bad_maintenance_cron() {
        let mut config = Config::default();
        config.scheduler.maintenance_cron = "every day".to_string();

        let result = ConfigValidator::validate(&config);
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.path == "scheduler.maintenance_cron"));
    }

    #[test]
    fn test_validate_zero_interval() {
        let mut config = Config::default();
        config.scheduler.reconcile_interval_secs = 0;

        let result = ConfigValidator::validate(&config);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_validate_low_interval_warning() {
        let mut config = Config::default();
        config.scheduler.reconcile_interval_secs = 2;

        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.path == "scheduler.reconcile_interval_secs"));
    }

    #[test]
    fn test_validate_empty_prefix_warning() {
        let mut config = Config::default();
        config.scheduler.key_prefix = String::new();

        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_into_result_reports_first_error() {
        let mut config = Config::default();
        config.scheduler.group = String::new();
        config.scheduler.reconcile_interval_secs = 0;

        let err = ConfigValidator::validate(&config).into_result().unwrap_err();
        assert!(err.to_string().contains("scheduler.group"));
    }
