use chrono::{DateTime, Utc};

use crate::date::{format_http_date, parse_http_date};
use crate::status::FetchStatus;

/// Validators remembered between cycles of one monitor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedValidators {
    pub last_modified: Option<String>,
    pub etag: Option<String>,
}

impl CachedValidators {
    pub fn is_empty(&self) -> bool {
        self.last_modified.is_none() && self.etag.is_none()
    }

    /// Last-modified of the previous successful fetch, as a date
    pub fn previous_last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified.as_deref().and_then(parse_http_date)
    }

    /// Take whatever fresh validators a fetch returned; absent ones leave the
    /// cached value untouched. Returns true if anything changed.
    pub fn absorb(&mut self, status: &FetchStatus) -> bool {
        let mut updated = false;

        if let Some(last_modified) = status.new_last_modified() {
            self.last_modified = Some(format_http_date(&last_modified));
            updated = true;
        }

        if let Some(etag) = status.new_etag() {
            self.etag = Some(etag.to_string());
            updated = true;
        }

        updated
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn absorbs_fresh_validators() {
        let mut validators = CachedValidators::default();
        let mut status = FetchStatus::new();
        status.set_new_last_modified(Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()));
        status.set_new_etag(Some("\"v2\"".to_string()));

        assert!(validators.absorb(&status));
        assert_eq!(validators.last_modified.as_deref(), Some("Fri, 01 Mar 2024 12:00:00 GMT"));
        assert_eq!(validators.etag.as_deref(), Some("\"v2\""));
        assert_eq!(
            validators.previous_last_modified(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn missing_validators_are_not_rolled_back() {
        let mut validators = CachedValidators {
            last_modified: Some("Fri, 01 Mar 2024 12:00:00 GMT".to_string()),
            etag: Some("\"v1\"".to_string()),
        };

        assert!(!validators.absorb(&FetchStatus::new()));
        assert_eq!(validators.etag.as_deref(), Some("\"v1\""));
        assert!(validators.last_modified.is_some());
    }

    #[test]
    fn starts_empty() {
        let validators = CachedValidators::default();
        assert!(validators.is_empty());
        assert!(validators.previous_last_modified().is_none());
    }
}
