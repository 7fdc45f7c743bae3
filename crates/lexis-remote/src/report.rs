use lexis_core::FetchStatus;
use lexis_types::DictionaryCategory;
use serde::Serialize;

use crate::error::{ReportError, chain};

/// Body posted to the status collector
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReport {
    pub ip: Option<String>,
    pub dic_category: u8,
    pub fetch_start: i64,
    pub fetch_end: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_of_previous_fetch: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
    pub success_num: u64,
    pub fail_num: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_exception_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_exception_stack: Option<String>,
}

impl FetchReport {
    pub fn new(category: DictionaryCategory, status: &FetchStatus, ip: Option<String>) -> Self {
        let millis = |d: chrono::DateTime<chrono::Utc>| d.timestamp_millis();
        let sample = status.sample_error();

        Self {
            ip,
            dic_category: category.code(),
            fetch_start: status.started_at().map(millis).unwrap_or_default(),
            fetch_end: status.ended_at().map(millis).unwrap_or_default(),
            last_modified_of_previous_fetch: status.previous_last_modified().map(millis),
            last_modified: status.new_last_modified().map(millis),
            success_num: status.success_count(),
            fail_num: status.fail_count(),
            sample_exception_class: sample.map(|s| s.class.clone()),
            sample_exception_stack: sample.map(|s| s.stack.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No collector configured
    Skipped,
    Delivered,
    Failed,
}

/// Best-effort delivery of fetch outcomes to a collector
#[derive(Clone)]
pub struct StatusReporter {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl StatusReporter {
    pub fn new(client: reqwest::Client, endpoint: Option<String>) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Post the status. Failures are logged and never returned.
    pub async fn report(&self, category: DictionaryCategory, status: &FetchStatus) -> ReportOutcome {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return ReportOutcome::Skipped;
        };

        let body = FetchReport::new(category, status, local_host_address().await);

        match self.post(endpoint, &body).await {
            Ok(()) => {
                tracing::debug!("reported {} fetch status to {}", category, endpoint);
                ReportOutcome::Delivered
            }
            Err(err) => {
                tracing::error!("failed to report fetch status to {}: {}", endpoint, chain(&err));
                ReportOutcome::Failed
            }
        }
    }

    async fn post(&self, endpoint: &str, body: &FetchReport) -> Result<(), ReportError> {
        let response = self.client.post(endpoint).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// First address the local host name resolves to
async fn local_host_address() -> Option<String> {
    let name = match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::error!("failed to read host name: {}", e);
            return None;
        }
    };

    match tokio::net::lookup_host((name.as_str(), 0)).await {
        Ok(mut addrs) => addrs.next().map(|addr| addr.ip().to_string()),
        Err(e) => {
            tracing::error!("failed to resolve host {}: {}", name, e);
            None
        }
    }
}
