use dossier_core::traits::SnapshotWriter;
use dossier_core::{AppError, ProfileRecord};
use dossier_store::JsonSnapshotWriter;

use crate::integration::common::sample_record;

#[tokio::test]
async fn creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out").join("nested").join("profiles.json");

    JsonSnapshotWriter::new()
        .write_snapshot(&target, &[sample_record()])
        .await
        .unwrap();

    let written: Vec<ProfileRecord> =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written, vec![sample_record()]);
}

#[tokio::test]
async fn writes_pretty_json_with_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("profiles.json");

    JsonSnapshotWriter::new()
        .write_snapshot(&target, &[sample_record()])
        .await
        .unwrap();

    let text = std::fs::read_to_string(&target).unwrap();
    assert!(text.starts_with("[\n  {\n    \"name\": \"Acme Inc\""));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["teamSize"], 12);
    assert_eq!(value[0]["launchPosts"][0]["url"], "/launches/1");
    assert!(value[0].get("jobCount").is_none());
    assert!(value[0]["founders"][0].get("twitterUrl").is_none());
}

#[tokio::test]
async fn empty_snapshot_is_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("profiles.json");

    JsonSnapshotWriter::new()
        .write_snapshot(&target, &[])
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "[]");
}

#[tokio::test]
async fn overwrites_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("profiles.json");
    std::fs::write(&target, "stale").unwrap();

    JsonSnapshotWriter::new()
        .write_snapshot(&target, &[])
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "[]");
}

#[tokio::test]
async fn unwritable_target_is_output_error() {
    let dir = tempfile::tempdir().unwrap();
    // A file where a directory is expected.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let target = blocker.join("profiles.json");

    let err = JsonSnapshotWriter::new()
        .write_snapshot(&target, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::OutputError(_)));
}
