use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_read_timeout_ms() -> u64 {
    60_000
}

fn default_pool_idle_timeout_ms() -> u64 {
    90_000
}

fn default_pool_max_idle_per_host() -> usize {
    8
}

fn default_use_system_proxy() -> bool {
    true
}

fn default_user_agent() -> String {
    concat!("lexis/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Outbound HTTP settings shared by every monitor
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Bounds the whole request, body included
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "default_pool_idle_timeout_ms")]
    pub pool_idle_timeout_ms: u64,
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
    /// Honour HTTP_PROXY/HTTPS_PROXY from the environment
    #[serde(default = "default_use_system_proxy")]
    pub use_system_proxy: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            pool_idle_timeout_ms: default_pool_idle_timeout_ms(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
            use_system_proxy: default_use_system_proxy(),
            user_agent: default_user_agent(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        let connect_timeout_ms = env::var("CONNECT_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_connect_timeout_ms);

        let read_timeout_ms = env::var("READ_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_read_timeout_ms);

        let use_system_proxy = env::var("USE_SYSTEM_PROXY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_use_system_proxy);

        Self {
            connect_timeout_ms,
            read_timeout_ms,
            use_system_proxy,
            ..Self::default()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.pool_idle_timeout_ms)
    }
}
