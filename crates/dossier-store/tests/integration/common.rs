use std::path::PathBuf;

use dossier_core::models::{Founder, Job, LaunchPost, ProfileRecord};
use tempfile::TempDir;

/// Writes `contents` to `name` inside a fresh temp dir.
///
/// The `TempDir` must be kept in scope for the test duration;
/// dropping it deletes the directory.
pub fn write_temp_file(name: &str, contents: &str) -> (PathBuf, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write temp file");
    (path, dir)
}

/// A fully populated record.
pub fn sample_record() -> ProfileRecord {
    ProfileRecord {
        name: "Acme Inc".into(),
        description: "Rockets for everyone".into(),
        founded: "2020".into(),
        team_size: Some(12),
        location: "San Francisco".into(),
        founders: vec![Founder {
            name: "Jane Doe".into(),
            linked_in_url: Some("https://linkedin.com/jane".into()),
            twitter_url: None,
        }],
        launch_posts: vec![LaunchPost {
            title: "Launch HN: Acme".into(),
            url: "/launches/1".into(),
        }],
        job_count: None,
        jobs: vec![Job {
            role: "Founding Engineer".into(),
            location: "Remote".into(),
        }],
    }
}
