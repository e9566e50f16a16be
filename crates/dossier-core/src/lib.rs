pub mod batch;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod profile;
pub mod reporter;
pub mod traits;

#[cfg(test)]
pub mod testutil;

pub use batch::{BatchConfig, BatchCoordinator, BatchReport};
pub use error::AppError;
pub use models::{Founder, Job, LaunchPost, ProfileRecord, RunResult, SourceItem, compute_hash};
pub use pipeline::{Pipeline, RunSummary};
pub use profile::{FailureKind, ProfileFailure, ProfileOutcome, ProfileService};
pub use reporter::{ProfileEvent, ProfileReporter, SilentReporter, TracingProfileReporter};
pub use traits::{Fetcher, ProfileExtractor, SnapshotWriter, SourceReader};
