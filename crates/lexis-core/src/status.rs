use std::error::Error;

use chrono::{DateTime, Utc};

use crate::error::{LifecycleError, render_chain};

/// First error seen during a fetch, kept for the status report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleError {
    /// Rust type name of the captured error
    pub class: String,
    /// The error followed by one `Caused by:` line per source
    pub stack: String,
}

impl SampleError {
    pub fn capture<E: Error + 'static>(err: &E) -> Self {
        Self {
            class: std::any::type_name::<E>().to_string(),
            stack: render_chain(err, "\nCaused by: "),
        }
    }

    /// The top-level message, without causes
    pub fn message(&self) -> &str {
        self.stack.lines().next().unwrap_or_default()
    }
}

/// Outcome of one full fetch
#[derive(Debug, Default)]
pub struct FetchStatus {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    success_count: u64,
    fail_count: u64,
    sample_error: Option<SampleError>,
    previous_last_modified: Option<DateTime<Utc>>,
    new_last_modified: Option<DateTime<Utc>>,
    new_etag: Option<String>,
}

impl FetchStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) -> Result<(), LifecycleError> {
        if let Some(start) = self.start {
            return Err(LifecycleError::AlreadyStarted(start));
        }
        self.start = Some(Utc::now());
        Ok(())
    }

    /// Mark the fetch finished. The end never precedes the start even if the
    /// wall clock steps back in between.
    pub fn end(&mut self) -> Result<(), LifecycleError> {
        if let Some(end) = self.end {
            return Err(LifecycleError::AlreadyEnded(end));
        }
        let start = self.start.ok_or(LifecycleError::NotStarted)?;
        self.end = Some(Utc::now().max(start));
        Ok(())
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    /// Count a failed line, keeping only the first sample
    pub fn record_failure(&mut self, sample: SampleError) {
        self.fail_count += 1;
        self.record_error(sample);
    }

    /// Keep an error as the sample without counting a line
    pub fn record_error(&mut self, sample: SampleError) {
        if self.sample_error.is_none() {
            self.sample_error = Some(sample);
        }
    }

    pub fn success_count(&self) -> u64 {
        self.success_count
    }

    pub fn fail_count(&self) -> u64 {
        self.fail_count
    }

    pub fn total_count(&self) -> u64 {
        self.success_count + self.fail_count
    }

    pub fn sample_error(&self) -> Option<&SampleError> {
        self.sample_error.as_ref()
    }

    pub fn previous_last_modified(&self) -> Option<DateTime<Utc>> {
        self.previous_last_modified
    }

    pub fn set_previous_last_modified(&mut self, value: Option<DateTime<Utc>>) {
        self.previous_last_modified = value;
    }

    pub fn new_last_modified(&self) -> Option<DateTime<Utc>> {
        self.new_last_modified
    }

    pub fn set_new_last_modified(&mut self, value: Option<DateTime<Utc>>) {
        self.new_last_modified = value;
    }

    pub fn new_etag(&self) -> Option<&str> {
        self.new_etag.as_deref()
    }

    pub fn set_new_etag(&mut self, value: Option<String>) {
        self.new_etag = value;
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{AttributeError, LineError};

    use super::*;

    fn line_error(line: &str) -> LineError {
        let source = "x".parse::<i32>().unwrap_err();
        LineError {
            line: line.to_string(),
            source: AttributeError::InvalidFrequency {
                attribute: "n".to_string(),
                value: "x".to_string(),
                source,
            }
            .into(),
        }
    }

    #[test]
    fn start_twice_is_a_lifecycle_error() {
        let mut status = FetchStatus::new();
        status.start().unwrap();
        assert!(matches!(status.start(), Err(LifecycleError::AlreadyStarted(_))));
    }

    #[test]
    fn end_twice_is_a_lifecycle_error() {
        let mut status = FetchStatus::new();
        status.start().unwrap();
        status.end().unwrap();
        assert!(matches!(status.end(), Err(LifecycleError::AlreadyEnded(_))));
    }

    #[test]
    fn end_requires_start() {
        let mut status = FetchStatus::new();
        assert!(matches!(status.end(), Err(LifecycleError::NotStarted)));
    }

    #[test]
    fn end_is_not_before_start() {
        let mut status = FetchStatus::new();
        status.start().unwrap();
        status.end().unwrap();
        assert!(status.ended_at().unwrap() >= status.started_at().unwrap());
    }

    #[test]
    fn first_failure_is_the_sample() {
        let mut status = FetchStatus::new();
        status.record_success();
        status.record_failure(SampleError::capture(&line_error("first")));
        status.record_failure(SampleError::capture(&line_error("second")));

        assert_eq!(status.success_count(), 1);
        assert_eq!(status.fail_count(), 2);
        assert_eq!(status.total_count(), 3);
        assert_eq!(status.sample_error().unwrap().message(), "failed to apply line `first`");
    }

    #[test]
    fn sample_records_the_cause_chain() {
        let sample = SampleError::capture(&line_error("w n x"));
        assert_eq!(sample.class, "lexis_core::error::LineError");
        let lines: Vec<&str> = sample.stack.lines().collect();
        assert_eq!(lines[0], "failed to apply line `w n x`");
        assert_eq!(lines[1], "Caused by: invalid frequency `x` for attribute `n`");
        assert!(lines[2].starts_with("Caused by: invalid digit"));
    }

    #[test]
    fn record_error_does_not_count() {
        let mut status = FetchStatus::new();
        status.record_error(SampleError::capture(&line_error("w")));
        assert_eq!(status.total_count(), 0);
        assert!(status.sample_error().is_some());
    }
}
