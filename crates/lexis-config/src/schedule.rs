use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_initial_delay_seconds() -> u64 {
    10
}

fn default_interval_seconds() -> u64 {
    60
}

/// Cadence applied by the host to every monitor
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ScheduleConfig {
    #[serde(default = "default_initial_delay_seconds")]
    pub initial_delay_seconds: u64,
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            initial_delay_seconds: default_initial_delay_seconds(),
            interval_seconds: default_interval_seconds(),
        }
    }
}

impl ScheduleConfig {
    pub fn new() -> Self {
        let initial_delay_seconds = env::var("INITIAL_DELAY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_initial_delay_seconds);

        let interval_seconds = env::var("POLL_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_interval_seconds);

        Self {
            initial_delay_seconds,
            interval_seconds,
        }
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_seconds)
    }

    /// Zero would spin, so the period is at least one second
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }
}
