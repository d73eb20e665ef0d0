//! Reward queue configuration.

use serde::{Deserialize, Serialize};

/// Reward presentation queue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Pause in milliseconds between closing one reward and promoting the next.
    #[serde(default = "default_settle_gap")]
    pub settle_gap_ms: u64,
    /// Capacity of the scheduler command channel.
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            settle_gap_ms: default_settle_gap(),
            command_buffer: default_command_buffer(),
        }
    }
}

fn default_settle_gap() -> u64 {
    300
}

fn default_command_buffer() -> usize {
    64
}
