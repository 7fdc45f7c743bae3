use std::sync::Arc;

use anyhow::Context;
use lexis_config::Config;
use lexis_core::{Dictionaries, MemoryLexicon, ResourceLocation};
use lexis_remote::{MonitorContext, RemoteMonitor, build_client};
use lexis_types::DictionaryCategory;

use crate::status::AppStatus;

pub struct AppState {
    pub config: Config,
    pub lexicon: Arc<MemoryLexicon>,
    pub context: MonitorContext,
    pub status: AppStatus,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = build_client(&config.network).context("failed to build HTTP client")?;
        let lexicon = Arc::new(MemoryLexicon::new());
        let context = MonitorContext::new(
            client,
            Dictionaries::shared(lexicon.clone()),
            config.report.endpoint().map(str::to_string),
        );

        if let Some(endpoint) = context.reporter.endpoint() {
            tracing::info!("reporting fetch status to {}", endpoint);
        }

        Ok(Self {
            config,
            lexicon,
            context,
            status: AppStatus::new(),
        })
    }

    /// One monitor per configured location, main dictionaries first
    pub fn monitors(&self) -> Vec<RemoteMonitor> {
        let main = self
            .config
            .dictionary
            .main
            .iter()
            .map(|raw| (DictionaryCategory::Main, raw));
        let stop_words = self
            .config
            .dictionary
            .stop_words
            .iter()
            .map(|raw| (DictionaryCategory::StopWord, raw));

        main.chain(stop_words)
            .map(|(category, raw)| {
                RemoteMonitor::new(ResourceLocation::parse(category, raw), &self.context)
            })
            .collect()
    }
}
