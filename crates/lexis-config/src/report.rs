use std::env;

use serde::{Deserialize, Serialize};

/// Where fetch outcomes are posted
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    pub url: Option<String>,
}

impl ReportConfig {
    pub fn new() -> Self {
        Self {
            url: env::var("REPORT_FETCH_STATUS_URL").ok(),
        }
    }

    /// Configured collector url, blank values count as unset
    pub fn endpoint(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}
