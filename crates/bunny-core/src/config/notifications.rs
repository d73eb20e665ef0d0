//! Notification polling configuration.

use serde::{Deserialize, Serialize};

/// Notification polling and dedup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Interval in seconds between notification polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Maximum number of records requested per poll.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
    /// Optional JSON file mirroring the processed notification ids.
    ///
    /// When unset, dedup state lives only as long as the session.
    #[serde(default)]
    pub processed_state_file: Option<String>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            fetch_limit: default_fetch_limit(),
            processed_state_file: None,
        }
    }
}

fn default_poll_interval() -> u64 {
    15
}

fn default_fetch_limit() -> u32 {
    20
}
