use lexis_core::{CachedValidators, ResourceLocation};
use reqwest::StatusCode;
use reqwest::header::{ETAG, HeaderMap, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};

use crate::error::{SyncError, chain};
use crate::http::last_header;

/// Which validator revealed a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSignal {
    LastModified,
    ETag,
}

/// Result of the cheap change check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCheck {
    /// 304
    NotModified,
    /// 200 without a differing validator
    Unchanged,
    Changed(ChangeSignal),
    BadStatus(u16),
    /// The request itself failed, the next cycle starts over
    Unreachable,
}

impl ChangeCheck {
    pub fn is_changed(&self) -> bool {
        matches!(self, ChangeCheck::Changed(_))
    }
}

/// Metadata-only requests deciding whether a full fetch is needed
#[derive(Clone)]
pub struct ConditionalFetcher {
    client: reqwest::Client,
}

impl ConditionalFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Send a HEAD with the cached validators attached.
    /// Transport failures are logged and reported as [`ChangeCheck::Unreachable`].
    pub async fn check_changed(
        &self,
        location: &ResourceLocation,
        validators: &CachedValidators,
    ) -> ChangeCheck {
        let check = match self.probe(location.probe_path(), validators).await {
            Ok(check) => check,
            Err(err) => {
                tracing::error!(
                    last_modified = ?validators.last_modified,
                    etag = ?validators.etag,
                    "remote dictionary {} error: {}",
                    location,
                    chain(&err)
                );
                return ChangeCheck::Unreachable;
            }
        };

        match check {
            ChangeCheck::NotModified => tracing::info!(
                "remote dictionary {} not modified since {:?}",
                location,
                validators.last_modified
            ),
            ChangeCheck::BadStatus(code) => {
                tracing::warn!("remote dictionary {} returned bad status {}", location, code)
            }
            ChangeCheck::Changed(signal) => {
                tracing::info!("remote dictionary {} changed ({:?})", location, signal)
            }
            ChangeCheck::Unchanged | ChangeCheck::Unreachable => {
                tracing::debug!("remote dictionary {} unchanged", location)
            }
        }

        check
    }

    async fn probe(&self, url: &str, validators: &CachedValidators) -> Result<ChangeCheck, SyncError> {
        let mut request = self.client.head(url);

        if let Some(last_modified) = &validators.last_modified {
            request = request.header(IF_MODIFIED_SINCE, last_modified.as_str());
        }
        if let Some(etag) = &validators.etag {
            request = request.header(IF_NONE_MATCH, etag.as_str());
        }

        let response = request.send().await.map_err(SyncError::transport(url))?;
        Ok(classify(response.status(), response.headers(), validators))
    }
}

/// A 200 counts as changed only if Last-Modified, or failing that ETag,
/// differs from the cached value (case-insensitive).
pub(crate) fn classify(
    status: StatusCode,
    headers: &HeaderMap,
    validators: &CachedValidators,
) -> ChangeCheck {
    match status {
        StatusCode::OK => {
            if differs(last_header(headers, LAST_MODIFIED), validators.last_modified.as_deref()) {
                ChangeCheck::Changed(ChangeSignal::LastModified)
            } else if differs(last_header(headers, ETAG), validators.etag.as_deref()) {
                ChangeCheck::Changed(ChangeSignal::ETag)
            } else {
                ChangeCheck::Unchanged
            }
        }
        StatusCode::NOT_MODIFIED => ChangeCheck::NotModified,
        other => ChangeCheck::BadStatus(other.as_u16()),
    }
}

fn differs(received: Option<String>, cached: Option<&str>) -> bool {
    match received {
        Some(received) => cached.is_none_or(|cached| !received.eq_ignore_ascii_case(cached)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn headers(pairs: &[(reqwest::header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    fn cached() -> CachedValidators {
        CachedValidators {
            last_modified: Some("Fri, 01 Mar 2024 12:00:00 GMT".to_string()),
            etag: Some("\"abc\"".to_string()),
        }
    }

    #[test]
    fn validators_compare_case_insensitively() {
        let h = headers(&[
            (LAST_MODIFIED, "FRI, 01 MAR 2024 12:00:00 GMT"),
            (ETAG, "\"ABC\""),
        ]);
        assert_eq!(classify(StatusCode::OK, &h, &cached()), ChangeCheck::Unchanged);
    }

    #[test]
    fn last_modified_wins_over_etag() {
        let h = headers(&[(LAST_MODIFIED, "Sat, 02 Mar 2024 12:00:00 GMT"), (ETAG, "\"abc\"")]);
        assert_eq!(
            classify(StatusCode::OK, &h, &cached()),
            ChangeCheck::Changed(ChangeSignal::LastModified)
        );
    }

    #[test]
    fn last_header_occurrence_is_used() {
        let h = headers(&[(ETAG, "\"new\""), (ETAG, "\"abc\"")]);
        assert_eq!(classify(StatusCode::OK, &h, &cached()), ChangeCheck::Unchanged);
    }

    #[test]
    fn no_validators_at_all_is_unchanged() {
        assert_eq!(
            classify(StatusCode::OK, &HeaderMap::new(), &CachedValidators::default()),
            ChangeCheck::Unchanged
        );
    }

    #[test]
    fn first_sight_of_a_validator_is_a_change() {
        let h = headers(&[(ETAG, "\"abc\"")]);
        assert_eq!(
            classify(StatusCode::OK, &h, &CachedValidators::default()),
            ChangeCheck::Changed(ChangeSignal::ETag)
        );
    }

    #[test]
    fn other_statuses() {
        assert_eq!(
            classify(StatusCode::NOT_MODIFIED, &HeaderMap::new(), &cached()),
            ChangeCheck::NotModified
        );
        assert_eq!(
            classify(StatusCode::FORBIDDEN, &HeaderMap::new(), &cached()),
            ChangeCheck::BadStatus(403)
        );
    }
}
