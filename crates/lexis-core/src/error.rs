use std::error::Error;
use std::num::ParseIntError;

use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    #[error("attribute `{0}` has no frequency")]
    Unpaired(String),

    #[error("invalid frequency `{value}` for attribute `{attribute}`")]
    InvalidFrequency {
        attribute: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("word is empty")]
    EmptyWord,

    #[error("malformed attributes `{0}`")]
    MalformedAttributes(String),

    #[error("dictionary lock poisoned")]
    Poisoned,
}

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A single dictionary line that could not be applied
#[derive(Debug, thiserror::Error)]
#[error("failed to apply line `{line}`")]
pub struct LineError {
    pub line: String,
    #[source]
    pub source: ApplyError,
}

/// Misuse of the fetch status lifecycle. Never expected at runtime.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("this fetch was already started at {0}")]
    AlreadyStarted(DateTime<Utc>),

    #[error("this fetch was already ended at {0}")]
    AlreadyEnded(DateTime<Utc>),

    #[error("this fetch was never started")]
    NotStarted,
}

/// Display of `err` followed by each of its sources, joined by `separator`
pub fn render_chain(err: &dyn Error, separator: &str) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(separator);
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
