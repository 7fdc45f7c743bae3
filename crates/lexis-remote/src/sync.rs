use chrono::{DateTime, Utc};
use lexis_core::command::parse_line;
use lexis_core::date::{format_http_date, parse_http_date};
use lexis_core::preprocess::LinePreprocessor;
use lexis_core::{
    Applied, Dictionaries, FetchStatus, LifecycleError, LineError, ResourceLocation, SampleError,
    apply_command,
};
use reqwest::StatusCode;
use reqwest::header::{ETAG, LAST_MODIFIED};

use crate::decode::{LineDecoder, response_encoding};
use crate::error::{SyncError, chain};
use crate::http::last_header;

/// Failed lines beyond this many are only logged at debug level
const VERBOSE_FAILURES: u64 = 3;

/// Url of a full fetch. The previous last-modified lets a cooperative server
/// answer with only the entries changed since then.
pub fn fetch_url(base_path: &str, previous_last_modified: Option<DateTime<Utc>>) -> String {
    let Some(previous) = previous_last_modified else {
        return base_path.to_string();
    };

    let separator = if !base_path.contains('?') {
        "?"
    } else if base_path.ends_with('?') || base_path.ends_with('&') {
        ""
    } else {
        "&"
    };

    format!(
        "{}{}lastModifiedOfPreviousFetch={}",
        base_path,
        separator,
        urlencoding::encode(&format_http_date(&previous))
    )
}

/// Streams a remote dictionary into the local stores, one line at a time
#[derive(Clone)]
pub struct DictionarySynchronizer {
    client: reqwest::Client,
    dictionaries: Dictionaries,
}

impl DictionarySynchronizer {
    pub fn new(client: reqwest::Client, dictionaries: Dictionaries) -> Self {
        Self {
            client,
            dictionaries,
        }
    }

    /// Run one full fetch.
    ///
    /// Network and status failures end up in the returned status as its sample
    /// error; a bad line is counted and skipped. Only a misuse of the status
    /// lifecycle is returned as an error. New validators are recorded only
    /// when the whole body was read.
    pub async fn sync(
        &self,
        location: &ResourceLocation,
        previous_last_modified: Option<DateTime<Utc>>,
    ) -> Result<FetchStatus, LifecycleError> {
        let mut status = FetchStatus::new();
        status.start()?;
        status.set_previous_last_modified(previous_last_modified);

        let url = fetch_url(location.base_path(), previous_last_modified);
        if let Err(err) = self.fetch(&url, location, &mut status).await {
            tracing::error!(
                "get remote words {} error, status = {:?}: {}",
                url,
                err.status_code(),
                chain(&err)
            );
            status.record_error(SampleError::capture(&err));
        }

        status.end()?;
        Ok(status)
    }

    async fn fetch(
        &self,
        url: &str,
        location: &ResourceLocation,
        status: &mut FetchStatus,
    ) -> Result<(), SyncError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SyncError::transport(url))?;

        if response.status() != StatusCode::OK {
            let code = response.status().as_u16();
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!("could not read error body from {}: {}", url, e);
                String::new()
            });
            return Err(SyncError::Status {
                url: url.to_string(),
                status: code,
                body,
            });
        }

        let headers = response.headers();
        let last_modified = last_header(headers, LAST_MODIFIED).and_then(|value| {
            let parsed = parse_http_date(&value);
            if parsed.is_none() {
                tracing::warn!("ignoring unparseable Last-Modified `{}` from {}", value, url);
            }
            parsed
        });
        let etag = last_header(headers, ETAG);

        let encoding = response_encoding(headers)?;
        tracing::debug!("decoding {} as {}", url, encoding.name());

        let mut decoder = LineDecoder::new(encoding);
        let mut preprocessor = LinePreprocessor::new();

        while let Some(chunk) = response.chunk().await.map_err(SyncError::transport(url))? {
            for line in decoder.feed(&chunk) {
                self.apply_line(location, &mut preprocessor, &line, status);
            }
        }
        for line in decoder.finish() {
            self.apply_line(location, &mut preprocessor, &line, status);
        }

        // only a body read to the end may advance the validators
        status.set_new_last_modified(last_modified);
        status.set_new_etag(etag);
        Ok(())
    }

    fn apply_line(
        &self,
        location: &ResourceLocation,
        preprocessor: &mut LinePreprocessor,
        raw: &str,
        status: &mut FetchStatus,
    ) {
        let line = preprocessor.process(raw);
        let command = parse_line(line);
        let default_attribute = location.default_attribute().unwrap_or_default();

        match apply_command(&self.dictionaries, location.category(), default_attribute, &command) {
            Ok(Applied::Updated) => status.record_success(),
            Ok(Applied::Skipped) => {}
            Err(source) => {
                let err = LineError {
                    line: line.to_string(),
                    source,
                };
                status.record_failure(SampleError::capture(&err));

                if status.fail_count() <= VERBOSE_FAILURES {
                    tracing::error!("{}", chain(&err));
                } else {
                    tracing::debug!("{}", chain(&err));
                }
            }
        }
    }
}
