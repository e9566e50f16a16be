use crate::error::AppError;
use crate::models::{ProfileRecord, SourceItem, compute_hash};
use crate::reporter::{ProfileEvent, ProfileReporter};
use crate::traits::{Fetcher, ProfileExtractor};

/// Stage at which a single item failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The item was rejected before any network I/O.
    InvalidItem,
    /// Transport error or non-success response.
    Fetch,
    /// The page was fetched but could not be mapped into a record.
    Extraction,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidItem => "invalid_item",
            FailureKind::Fetch => "fetch",
            FailureKind::Extraction => "extraction",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed item, kept for diagnostics only.
#[derive(Debug)]
pub struct ProfileFailure {
    pub name: String,
    pub url: String,
    pub kind: FailureKind,
    pub error: AppError,
}

impl std::fmt::Display for ProfileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failed for '{}' ({}): {}",
            self.kind, self.name, self.url, self.error
        )
    }
}

/// Tagged result of processing one item.
pub type ProfileOutcome = Result<ProfileRecord, ProfileFailure>;

/// Fetches one profile page and maps it into a record: validate → fetch → extract.
///
/// Every failure is caught here and returned as a [`ProfileFailure`];
/// nothing propagates to the caller as an error.
pub struct ProfileService<F, X, P>
where
    F: Fetcher,
    X: ProfileExtractor,
    P: ProfileReporter,
{
    fetcher: F,
    extractor: X,
    reporter: P,
}

impl<F, X, P> ProfileService<F, X, P>
where
    F: Fetcher,
    X: ProfileExtractor,
    P: ProfileReporter,
{
    pub fn new(fetcher: F, extractor: X, reporter: P) -> Self {
        Self {
            fetcher,
            extractor,
            reporter,
        }
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    /// Run the fetch pipeline for a single item.
    ///
    /// 1. Reject items without a URL (no network I/O)
    /// 2. GET the profile page
    /// 3. Extract the record from the page
    pub async fn fetch_profile(&self, item: &SourceItem) -> ProfileOutcome {
        match self.try_fetch_profile(item).await {
            Ok(record) => {
                self.reporter.report(ProfileEvent::Extracted {
                    name: &item.name,
                    profile_name: &record.name,
                });
                Ok(record)
            }
            Err((kind, error)) => Err(self.fail(item, kind, error)),
        }
    }

    /// Record a failure for `item` and report it.
    pub fn fail(&self, item: &SourceItem, kind: FailureKind, error: AppError) -> ProfileFailure {
        self.reporter.report(ProfileEvent::Failed {
            name: &item.name,
            url: &item.url,
            kind,
            error: &error,
        });
        ProfileFailure {
            name: item.name.clone(),
            url: item.url.clone(),
            kind,
            error,
        }
    }

    async fn try_fetch_profile(
        &self,
        item: &SourceItem,
    ) -> Result<ProfileRecord, (FailureKind, AppError)> {
        item.validate().map_err(|e| (FailureKind::InvalidItem, e))?;

        let url = item.url.trim();
        self.reporter.report(ProfileEvent::Fetching {
            name: &item.name,
            url,
        });
        let html = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| (FailureKind::Fetch, e))?;

        let content_hash = compute_hash(&html);
        self.reporter.report(ProfileEvent::Fetched {
            name: &item.name,
            bytes: html.len(),
            content_hash: &content_hash,
        });

        self.extractor
            .extract(&html)
            .map_err(|e| (FailureKind::Extraction, e))
    }
}
