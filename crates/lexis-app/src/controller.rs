use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lexis_remote::RemoteMonitor;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Application controller for task spawning and lifecycle
pub struct AppController {
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// One task per monitor, each on the configured cadence
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let schedule = &self.state.config.schedule;

        for monitor in self.state.monitors() {
            tasks.spawn(monitor_loop(
                monitor,
                schedule.initial_delay(),
                schedule.interval(),
                self.state.clone(),
                self.cancel_token.child_token(),
            ));
        }

        tasks
    }

    /// A single cycle for every monitor, one after another
    pub async fn run_once(&self) -> anyhow::Result<()> {
        for mut monitor in self.state.monitors() {
            run_cycle(&mut monitor, &self.state).await?;
        }
        Ok(())
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Cancellation is only observed between cycles
async fn monitor_loop(
    mut monitor: RemoteMonitor,
    initial_delay: Duration,
    interval: Duration,
    state: Arc<AppState>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tokio::select! {
        _ = cancel.cancelled() => return Ok(()),
        _ = tokio::time::sleep(initial_delay) => {}
    }

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }
        run_cycle(&mut monitor, &state).await?;
    }

    tracing::debug!("monitor for {} stopped", monitor.location());
    Ok(())
}

async fn run_cycle(monitor: &mut RemoteMonitor, state: &AppState) -> anyhow::Result<()> {
    let outcome = monitor
        .run_cycle()
        .await
        .with_context(|| format!("fetch status misuse while syncing {}", monitor.location()))?;
    state.status.record(monitor.location(), &outcome).await;
    Ok(())
}
