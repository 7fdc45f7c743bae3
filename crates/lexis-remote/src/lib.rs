mod decode;
mod error;
mod http;
mod monitor;
mod probe;
mod report;
mod scope;
mod sync;

pub use decode::{LineDecoder, charset_label};
pub use error::{ReportError, SyncError};
pub use http::build_client;
pub use monitor::{CycleOutcome, MonitorContext, MonitorState, RemoteMonitor, SyncSummary};
pub use probe::{ChangeCheck, ChangeSignal, ConditionalFetcher};
pub use report::{FetchReport, ReportOutcome, StatusReporter};
pub use scope::{HostScope, ScopeDenied, Unrestricted};
pub use sync::{DictionarySynchronizer, fetch_url};

#[cfg(test)]
mod tests;
