use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::batch::BatchCoordinator;
use crate::error::AppError;
use crate::profile::FailureKind;
use crate::reporter::ProfileReporter;
use crate::traits::{Fetcher, ProfileExtractor, SnapshotWriter, SourceReader};

/// Counts for one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub items: usize,
    pub succeeded: usize,
    pub invalid: usize,
    pub fetch_failed: usize,
    pub extraction_failed: usize,
    pub output: PathBuf,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.invalid + self.fetch_failed + self.extraction_failed
    }
}

/// Orchestrates one run: read items → batch fetch → write snapshot.
///
/// Reading and writing failures are fatal and returned to the caller;
/// per-item failures only lower the `succeeded` count.
pub struct Pipeline<R, F, X, P, W>
where
    R: SourceReader,
    F: Fetcher,
    X: ProfileExtractor,
    P: ProfileReporter,
    W: SnapshotWriter,
{
    reader: R,
    coordinator: BatchCoordinator<F, X, P>,
    writer: W,
    output: PathBuf,
}

impl<R, F, X, P, W> Pipeline<R, F, X, P, W>
where
    R: SourceReader,
    F: Fetcher,
    X: ProfileExtractor,
    P: ProfileReporter,
    W: SnapshotWriter,
{
    pub fn new(
        reader: R,
        coordinator: BatchCoordinator<F, X, P>,
        writer: W,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reader,
            coordinator,
            writer,
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub async fn run(&self) -> Result<RunSummary, AppError> {
        let run_id = Uuid::new_v4();

        // 1. Read
        let items = self.reader.read_items()?;
        tracing::info!(run_id = %run_id, items = items.len(), "Source items loaded");

        // 2. Fetch + extract
        let report = self.coordinator.run_batch_report(&items).await;

        // 3. Write, even when nothing succeeded
        self.writer
            .write_snapshot(&self.output, &report.records)
            .await?;
        tracing::info!(
            run_id = %run_id,
            path = %self.output.display(),
            records = report.records.len(),
            "Snapshot written"
        );

        let summary = RunSummary {
            run_id,
            items: items.len(),
            succeeded: report.records.len(),
            invalid: report.failed(FailureKind::InvalidItem),
            fetch_failed: report.failed(FailureKind::Fetch),
            extraction_failed: report.failed(FailureKind::Extraction),
            output: self.output.clone(),
        };

        tracing::info!(
            run_id = %run_id,
            items = summary.items,
            succeeded = summary.succeeded,
            invalid = summary.invalid,
            fetch_failed = summary.fetch_failed,
            extraction_failed = summary.extraction_failed,
            "Done"
        );

        Ok(summary)
    }
}
