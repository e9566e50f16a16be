use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// One unit of work read from the input: an organization and its profile URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub name: String,
    pub url: String,
}

impl SourceItem {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Reject items that cannot be fetched.
    ///
    /// A URL that is empty after trimming is invalid.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.url.trim().is_empty() {
            return Err(AppError::InvalidItem(format!("'{}' has no URL", self.name)));
        }
        Ok(())
    }
}

/// Structured profile extracted from one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Page heading, not the input name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub founded: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<i64>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub founders: Vec<Founder>,
    #[serde(default)]
    pub launch_posts: Vec<LaunchPost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_count: Option<i64>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Founder {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
}

/// Open role listed on a profile. Only built when both role and location exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub role: String,
    pub location: String,
}

/// Launch announcement linked from a profile. Only built when the link has a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPost {
    pub title: String,
    pub url: String,
}

/// Successful records of one run, in input order.
pub type RunResult = Vec<ProfileRecord>;

/// Compute a SHA-256 hash of a string, returned as 64-char hex.
pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
