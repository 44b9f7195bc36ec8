#[cfg(test)]
mod tests {
    use homekeep::libs::config::{Config, DashboardConfig, ScheduleConfig, CONFIG_FILE_NAME};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join(CONFIG_FILE_NAME);
            ConfigTestContext { _temp_dir: temp_dir, path }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.schedule.is_none());
        assert!(config.dashboard.is_none());
        assert_eq!(config.schedule(), ScheduleConfig::default());
        assert_eq!(config.schedule().high_priority_lead_days, 7);
        assert_eq!(config.schedule().short_cycle_lead_days, 14);
        assert_eq!(config.schedule().short_cycle_max_frequency, 90);
        assert_eq!(config.schedule().default_lead_days, 30);
        assert_eq!(config.dashboard().upcoming_days, 30);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.path).unwrap();
        assert!(config.schedule.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            schedule: Some(ScheduleConfig {
                high_priority_lead_days: 3,
                short_cycle_lead_days: 10,
                short_cycle_max_frequency: 60,
                default_lead_days: 45,
            }),
            dashboard: Some(DashboardConfig {
                upcoming_days: 14,
                currency: "€".to_string(),
            }),
        };
        config.save_to(&ctx.path).unwrap();

        let read = Config::read_from(&ctx.path).unwrap();
        assert_eq!(read.schedule, config.schedule);
        assert_eq!(read.dashboard, config.dashboard);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_config_falls_back(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, r#"{"dashboard":{"upcoming_days":7,"currency":"$"}}"#).unwrap();
        let config = Config::read_from(&ctx.path).unwrap();
        assert_eq!(config.dashboard().upcoming_days, 7);
        assert_eq!(config.schedule(), ScheduleConfig::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_config_is_an_error(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, "{ invalid json").unwrap();
        assert!(Config::read_from(&ctx.path).is_err());
    }
}
