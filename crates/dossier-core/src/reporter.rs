use crate::error::AppError;
use crate::profile::FailureKind;

/// Events emitted by the profile fetcher and batch coordinator.
#[derive(Debug, Clone, Copy)]
pub enum ProfileEvent<'a> {
    BatchStarted {
        items: usize,
    },
    Fetching {
        name: &'a str,
        url: &'a str,
    },
    Fetched {
        name: &'a str,
        bytes: usize,
        content_hash: &'a str,
    },
    Extracted {
        name: &'a str,
        profile_name: &'a str,
    },
    Failed {
        name: &'a str,
        url: &'a str,
        kind: FailureKind,
        error: &'a AppError,
    },
    BatchFinished {
        succeeded: usize,
        failed: usize,
    },
}

/// Trait for receiving profile events (decoupled logging).
pub trait ProfileReporter: Send + Sync {
    fn report(&self, event: ProfileEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProfileReporter for SilentReporter {}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProfileReporter;

impl ProfileReporter for TracingProfileReporter {
    fn report(&self, event: ProfileEvent<'_>) {
        match event {
            ProfileEvent::BatchStarted { items } => {
                tracing::info!(%items, "Fetching profiles");
            }
            ProfileEvent::Fetching { name, url } => {
                tracing::debug!(%name, %url, "Fetching profile");
            }
            ProfileEvent::Fetched {
                name,
                bytes,
                content_hash,
            } => {
                tracing::debug!(
                    %name,
                    %bytes,
                    content_hash = %&content_hash[..content_hash.len().min(8)],
                    "Fetched profile page"
                );
            }
            ProfileEvent::Extracted { name, profile_name } => {
                tracing::debug!(%name, %profile_name, "Profile extracted");
            }
            ProfileEvent::Failed {
                name,
                url,
                kind,
                error,
            } => {
                tracing::warn!(%name, %url, %kind, %error, "Error scraping profile");
            }
            ProfileEvent::BatchFinished { succeeded, failed } => {
                tracing::info!(%succeeded, %failed, "Batch finished");
            }
        }
    }
}
