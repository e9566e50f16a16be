use std::num::NonZeroUsize;

use futures::StreamExt;
use futures::future::join_all;
use futures::stream;

use crate::models::{ProfileRecord, RunResult, SourceItem};
use crate::profile::{FailureKind, ProfileFailure, ProfileOutcome, ProfileService};
use crate::reporter::{ProfileEvent, ProfileReporter};
use crate::traits::{Fetcher, ProfileExtractor};

/// Configuration for the batch coordinator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchConfig {
    /// Maximum number of in-flight fetches. `None` dispatches every item at once.
    pub concurrency: Option<NonZeroUsize>,
}

impl BatchConfig {
    /// Every item in flight at once.
    pub fn unbounded() -> Self {
        Self { concurrency: None }
    }

    pub fn with_concurrency(mut self, limit: NonZeroUsize) -> Self {
        self.concurrency = Some(limit);
        self
    }
}

/// Records and failures of one batch, each in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<ProfileRecord>,
    pub failures: Vec<ProfileFailure>,
}

impl BatchReport {
    pub fn failed(&self, kind: FailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }
}

/// Fans out one profile fetch per item and collects the outcomes in input order.
///
/// All fetches are futures polled on the calling task; completion order is
/// unspecified, collection order always matches the input.
pub struct BatchCoordinator<F, X, P>
where
    F: Fetcher,
    X: ProfileExtractor,
    P: ProfileReporter,
{
    service: ProfileService<F, X, P>,
    config: BatchConfig,
}

impl<F, X, P> BatchCoordinator<F, X, P>
where
    F: Fetcher,
    X: ProfileExtractor,
    P: ProfileReporter,
{
    pub fn new(service: ProfileService<F, X, P>, config: BatchConfig) -> Self {
        Self { service, config }
    }

    pub fn service(&self) -> &ProfileService<F, X, P> {
        &self.service
    }

    /// Process every item and return the successful records in input order.
    pub async fn run_batch(&self, items: &[SourceItem]) -> RunResult {
        self.run_batch_report(items).await.records
    }

    /// Like [`run_batch`](Self::run_batch), but also keeps the failures.
    pub async fn run_batch_report(&self, items: &[SourceItem]) -> BatchReport {
        let outcomes = self.run_outcomes(items).await;

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(record) => report.records.push(record),
                Err(failure) => report.failures.push(failure),
            }
        }

        self.service.reporter().report(ProfileEvent::BatchFinished {
            succeeded: report.records.len(),
            failed: report.failures.len(),
        });
        report
    }

    /// Index-aligned outcomes: `outcomes[i]` belongs to `items[i]`.
    ///
    /// Invalid items are rejected here and never reach the fetcher.
    pub async fn run_outcomes(&self, items: &[SourceItem]) -> Vec<ProfileOutcome> {
        self.service
            .reporter()
            .report(ProfileEvent::BatchStarted { items: items.len() });

        let tasks = items.iter().map(|item| async move {
            match item.validate() {
                Ok(()) => self.service.fetch_profile(item).await,
                Err(e) => Err(self.service.fail(item, FailureKind::InvalidItem, e)),
            }
        });

        match self.config.concurrency {
            None => join_all(tasks).await,
            Some(limit) => stream::iter(tasks).buffered(limit.get()).collect().await,
        }
    }
}
