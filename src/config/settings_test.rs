#[cfg(test)]
mod tests {
    use crate::config::settings::{Settings, DEFAULT_USER_AGENT};

    #[test]
    fn test_config_loading_and_env_override() {
        let settings = Settings::new().expect("default configuration should load");
        assert_eq!(settings.http.timeout_secs, 15);
        assert_eq!(settings.http.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(settings.browser.remote_debugging_url, None);
        assert_eq!(settings.batch.delay_ms, 1500);
        assert!(settings.output.json);

        std::env::set_var("SKU_HARVESTER__BATCH__DELAY_MS", "10");
        std::env::set_var("SKU_HARVESTER__HTTP__TIMEOUT_SECS", "3");
        let overridden = Settings::new();
        std::env::remove_var("SKU_HARVESTER__BATCH__DELAY_MS");
        std::env::remove_var("SKU_HARVESTER__HTTP__TIMEOUT_SECS");

        let overridden = overridden.expect("environment overrides should load");
        assert_eq!(overridden.batch.delay_ms, 10);
        assert_eq!(overridden.http.timeout_secs, 3);
    }

    #[test]
    fn test_default_settings_match_loader_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.http.timeout_secs, 15);
        assert_eq!(settings.browser.timeout_secs, 30);
        assert_eq!(settings.output.dir, "./output");
    }
}
