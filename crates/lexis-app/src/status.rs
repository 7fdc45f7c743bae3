use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::SystemTime;

use lexis_core::ResourceLocation;
use lexis_remote::CycleOutcome;
use tokio::sync::RwLock;

/// Counters of one monitored resource
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonitorStatus {
    pub cycles: u64,
    pub syncs: u64,
    pub denied: u64,
    pub last_success_count: u64,
    pub last_fail_count: u64,
    pub last_sync_time: Option<SystemTime>,
    pub last_error: Option<String>,
}

/// Application status
pub struct AppStatus {
    pub monitors: Arc<RwLock<BTreeMap<String, MonitorStatus>>>,
}

impl AppStatus {
    pub fn new() -> Self {
        Self {
            monitors: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub async fn record(&self, location: &ResourceLocation, outcome: &CycleOutcome) {
        let key = format!("{} {}", location.category(), location.raw());
        let mut monitors = self.monitors.write().await;
        let entry = monitors.entry(key).or_default();

        entry.cycles += 1;
        match outcome {
            CycleOutcome::Denied => entry.denied += 1,
            CycleOutcome::Checked(_) => {}
            CycleOutcome::Synchronized(summary) => {
                entry.syncs += 1;
                entry.last_success_count = summary.success_count;
                entry.last_fail_count = summary.fail_count;
                entry.last_sync_time = Some(SystemTime::now());
                entry.last_error = summary.sample_error.as_ref().map(|s| s.message().to_string());
            }
        }
    }

    pub async fn snapshot(&self) -> BTreeMap<String, MonitorStatus> {
        self.monitors.read().await.clone()
    }

    pub async fn log_summary(&self) {
        for (resource, status) in self.snapshot().await {
            tracing::info!(
                cycles = status.cycles,
                syncs = status.syncs,
                denied = status.denied,
                last_success = status.last_success_count,
                last_fail = status.last_fail_count,
                last_error = ?status.last_error,
                last_sync = ?status.last_sync_time,
                "{}",
                resource
            );
        }
    }
}

impl Default for AppStatus {
    fn default() -> Self {
        Self::new()
    }
}
