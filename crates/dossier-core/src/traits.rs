use std::future::Future;
use std::path::Path;

use crate::error::AppError;
use crate::models::{ProfileRecord, SourceItem};

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Maps one page of profile markup into a [`ProfileRecord`].
///
/// Implementations are synchronous and free of I/O. Missing optional
/// structure must degrade to absent fields; an `Err` is reserved for
/// unexpected faults.
pub trait ProfileExtractor: Send + Sync + Clone {
    fn extract(&self, html: &str) -> Result<ProfileRecord, AppError>;
}

/// Produces the ordered source items for a run.
pub trait SourceReader {
    fn read_items(&self) -> Result<Vec<SourceItem>, AppError>;
}

/// Durably persists the records of a run as one document.
pub trait SnapshotWriter: Send + Sync {
    fn write_snapshot(
        &self,
        target: &Path,
        records: &[ProfileRecord],
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}
