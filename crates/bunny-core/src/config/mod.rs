//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so an empty file is valid.

pub mod client;
pub mod logging;
pub mod notifications;
pub mod recommendation;
pub mod scheduler;

use serde::{Deserialize, Serialize};

pub use self::client::ClientConfig;
pub use self::logging::LoggingConfig;
pub use self::notifications::NotificationsConfig;
pub use self::recommendation::RecommendationConfig;
pub use self::scheduler::SchedulerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (`config/default.toml` + environment overlay + `BUNNY__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// BunnySteps API client settings.
    #[serde(default)]
    pub client: ClientConfig,
    /// Notification polling and dedup settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Reward queue settings.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Budget recommendation policy.
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `BUNNY` (`__` separated).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BUNNY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.client.base_url.trim().is_empty() {
            return Err(AppError::validation("client.base_url must not be empty"));
        }
        if self.notifications.poll_interval_seconds == 0 {
            return Err(AppError::validation(
                "notifications.poll_interval_seconds must be greater than zero",
            ));
        }
        let ratio = self.recommendation.reserve_ratio;
        if !(0.0..1.0).contains(&ratio) {
            return Err(AppError::validation(format!(
                "recommendation.reserve_ratio must be within [0, 1), got {ratio}"
            )));
        }
        if self.scheduler.command_buffer == 0 {
            return Err(AppError::validation(
                "scheduler.command_buffer must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config.notifications.poll_interval_seconds, 15);
        assert_eq!(config.recommendation.coin_threshold, 500);
        assert_eq!(config.scheduler.settle_gap_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"notifications": {"poll_interval_seconds": 30}}"#)
                .expect("deserialize");
        assert_eq!(config.notifications.poll_interval_seconds, 30);
        assert_eq!(config.notifications.fetch_limit, 20);
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = AppConfig::default();
        config.notifications.poll_interval_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_reserve_ratio() {
        let mut config = AppConfig::default();
        config.recommendation.reserve_ratio = 1.0;
        assert!(config.validate().is_err());
        config.recommendation.reserve_ratio = -0.1;
        assert!(config.validate().is_err());
    }
}
