//! Test utilities: mock implementations of all core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::AppError;
use crate::models::{ProfileRecord, SourceItem};
use crate::reporter::{ProfileEvent, ProfileReporter};
use crate::traits::{Fetcher, ProfileExtractor, SnapshotWriter, SourceReader};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher keyed by URL, with optional per-URL delays.
///
/// Unknown URLs fail with an HTTP 404 error. Every requested URL is
/// recorded in `calls` in the order the requests were issued.
#[derive(Clone, Default)]
pub struct MockFetcher {
    responses: Arc<Mutex<HashMap<String, Result<String, AppError>>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub fn with_error(self, url: &str, error: AppError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(error));
        self
    }

    /// Delay the response for `url`, to force out-of-order completion.
    pub fn with_delay(self, url: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(url.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.calls.lock().unwrap().push(url.to_string());

        let delay = self.delays.lock().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.responses.lock().unwrap().remove(url);
        response.unwrap_or_else(|| Err(AppError::HttpError(format!("HTTP 404 for {url}"))))
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Mock extractor that turns the page body into the profile name.
#[derive(Clone, Default)]
pub struct MockExtractor {
    fail_marker: Option<String>,
}

impl MockExtractor {
    /// Returns a record whose `name` is the trimmed HTML body.
    pub fn echo() -> Self {
        Self::default()
    }

    /// Like [`echo`](Self::echo), but fails on bodies containing `marker`.
    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_marker: Some(marker.to_string()),
        }
    }
}

impl ProfileExtractor for MockExtractor {
    fn extract(&self, html: &str) -> Result<ProfileRecord, AppError> {
        if let Some(marker) = &self.fail_marker
            && html.contains(marker.as_str())
        {
            return Err(AppError::ExtractionError(format!(
                "malformed document ({marker})"
            )));
        }
        Ok(ProfileRecord {
            name: html.trim().to_string(),
            ..Default::default()
        })
    }
}

// ---------------------------------------------------------------------------
// MockReporter
// ---------------------------------------------------------------------------

/// Mock reporter that records `"Label:name"` strings for each event.
#[derive(Clone, Default)]
pub struct MockReporter {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl MockReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProfileReporter for MockReporter {
    fn report(&self, event: ProfileEvent<'_>) {
        let label = match &event {
            ProfileEvent::BatchStarted { items } => format!("BatchStarted:{items}"),
            ProfileEvent::Fetching { name, .. } => format!("Fetching:{name}"),
            ProfileEvent::Fetched { name, .. } => format!("Fetched:{name}"),
            ProfileEvent::Extracted { name, .. } => format!("Extracted:{name}"),
            ProfileEvent::Failed { name, kind, .. } => format!("Failed:{name}:{kind}"),
            ProfileEvent::BatchFinished { succeeded, failed } => {
                format!("BatchFinished:{succeeded}:{failed}")
            }
        };
        self.events.lock().unwrap().push(label);
    }
}

// ---------------------------------------------------------------------------
// MockReader
// ---------------------------------------------------------------------------

/// Mock source reader returning a fixed item list or an error.
pub struct MockReader {
    items: Mutex<Option<Result<Vec<SourceItem>, AppError>>>,
}

impl MockReader {
    pub fn new(items: Vec<SourceItem>) -> Self {
        Self {
            items: Mutex::new(Some(Ok(items))),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            items: Mutex::new(Some(Err(error))),
        }
    }
}

impl SourceReader for MockReader {
    fn read_items(&self) -> Result<Vec<SourceItem>, AppError> {
        self.items
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

// ---------------------------------------------------------------------------
// MockWriter
// ---------------------------------------------------------------------------

/// Recorded snapshot write: (target, records).
pub type WrittenSnapshot = (PathBuf, Vec<ProfileRecord>);

/// Mock writer that records every snapshot it is given.
#[derive(Clone, Default)]
pub struct MockWriter {
    pub written: Arc<Mutex<Vec<WrittenSnapshot>>>,
    write_error: Arc<Mutex<Option<AppError>>>,
}

impl MockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            written: Arc::new(Mutex::new(Vec::new())),
            write_error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl SnapshotWriter for MockWriter {
    async fn write_snapshot(
        &self,
        target: &Path,
        records: &[ProfileRecord],
    ) -> Result<(), AppError> {
        if let Some(e) = self.write_error.lock().unwrap().take() {
            return Err(e);
        }
        self.written
            .lock()
            .unwrap()
            .push((target.to_path_buf(), records.to_vec()));
        Ok(())
    }
}
