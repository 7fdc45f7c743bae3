use lexis_core::error::render_chain;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("unsupported charset `{0}`")]
    UnsupportedCharset(String),
}

impl SyncError {
    pub fn transport(url: &str) -> impl FnOnce(reqwest::Error) -> Self + '_ {
        move |source| SyncError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            SyncError::Status { status, .. } => Some(*status),
            SyncError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            SyncError::UnsupportedCharset(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to post fetch status")]
    Transport(#[from] reqwest::Error),

    #[error("collector returned status {0}")]
    Status(u16),
}

/// Render an error with its whole source chain on one line
pub(crate) fn chain(err: &dyn std::error::Error) -> String {
    render_chain(err, ": ")
}
