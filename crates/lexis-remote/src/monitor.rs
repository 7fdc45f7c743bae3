use std::sync::Arc;

use lexis_core::{CachedValidators, Dictionaries, LifecycleError, ResourceLocation, SampleError};
use tracing::Instrument;
use uuid::Uuid;

use crate::probe::{ChangeCheck, ConditionalFetcher};
use crate::report::{ReportOutcome, StatusReporter};
use crate::scope::{HostScope, Unrestricted};
use crate::sync::DictionarySynchronizer;

/// Resources shared by every monitor of a process
#[derive(Clone)]
pub struct MonitorContext {
    pub client: reqwest::Client,
    pub dictionaries: Dictionaries,
    pub reporter: StatusReporter,
    pub scope: Arc<dyn HostScope>,
}

impl MonitorContext {
    pub fn new(client: reqwest::Client, dictionaries: Dictionaries, report_url: Option<String>) -> Self {
        Self {
            reporter: StatusReporter::new(client.clone(), report_url),
            client,
            dictionaries,
            scope: Arc::new(Unrestricted),
        }
    }

    pub fn with_scope(mut self, scope: Arc<dyn HostScope>) -> Self {
        self.scope = scope;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Nothing fetched yet
    Idle,
    /// Holding validators of the last observed resource state
    Synced,
}

#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub success_count: u64,
    pub fail_count: u64,
    pub sample_error: Option<SampleError>,
    pub validators_updated: bool,
    pub report: ReportOutcome,
}

#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// The host scope refused the cycle
    Denied,
    /// The change check did not lead to a fetch
    Checked(ChangeCheck),
    Synchronized(SyncSummary),
}

/// Keeps one remote resource in sync.
///
/// `run_cycle` takes `&mut self`, so cycles of one monitor never overlap.
pub struct RemoteMonitor {
    location: ResourceLocation,
    validators: CachedValidators,
    fetcher: ConditionalFetcher,
    synchronizer: DictionarySynchronizer,
    reporter: StatusReporter,
    scope: Arc<dyn HostScope>,
}

impl RemoteMonitor {
    pub fn new(location: ResourceLocation, context: &MonitorContext) -> Self {
        Self {
            location,
            validators: CachedValidators::default(),
            fetcher: ConditionalFetcher::new(context.client.clone()),
            synchronizer: DictionarySynchronizer::new(
                context.client.clone(),
                context.dictionaries.clone(),
            ),
            reporter: context.reporter.clone(),
            scope: context.scope.clone(),
        }
    }

    pub fn location(&self) -> &ResourceLocation {
        &self.location
    }

    pub fn validators(&self) -> &CachedValidators {
        &self.validators
    }

    pub fn state(&self) -> MonitorState {
        if self.validators.is_empty() {
            MonitorState::Idle
        } else {
            MonitorState::Synced
        }
    }

    /// Check for a change and, if there is one, fetch, apply and report.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, LifecycleError> {
        let span = tracing::info_span!(
            "fetch_cycle",
            cycle = %Uuid::new_v4(),
            category = %self.location.category(),
            location = self.location.raw(),
        );
        self.cycle().instrument(span).await
    }

    async fn cycle(&mut self) -> Result<CycleOutcome, LifecycleError> {
        if let Err(denied) = self.scope.enter() {
            tracing::warn!("skipping cycle: {}", denied);
            return Ok(CycleOutcome::Denied);
        }

        let check = self.fetcher.check_changed(&self.location, &self.validators).await;
        if !check.is_changed() {
            return Ok(CycleOutcome::Checked(check));
        }

        tracing::info!("load remote {} dictionary: {}", self.location.category(), self.location.raw());
        let status = self
            .synchronizer
            .sync(&self.location, self.validators.previous_last_modified())
            .await?;
        tracing::info!(
            "finish loading remote {} dictionary: {} applied, {} failed",
            self.location.category(),
            status.success_count(),
            status.fail_count()
        );

        // validators from the full fetch win over the ones seen by the check
        let validators_updated = self.validators.absorb(&status);
        let report = self.reporter.report(self.location.category(), &status).await;

        Ok(CycleOutcome::Synchronized(SyncSummary {
            success_count: status.success_count(),
            fail_count: status.fail_count(),
            sample_error: status.sample_error().cloned(),
            validators_updated,
            report,
        }))
    }
}
