use std::path::Path;

use dossier_core::AppError;
use dossier_core::models::ProfileRecord;
use dossier_core::traits::SnapshotWriter;

/// Writes the run's records as one pretty-printed JSON array.
///
/// Missing parent directories are created first.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSnapshotWriter;

impl JsonSnapshotWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotWriter for JsonSnapshotWriter {
    async fn write_snapshot(
        &self,
        target: &Path,
        records: &[ProfileRecord],
    ) -> Result<(), AppError> {
        if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                AppError::OutputError(format!(
                    "Failed to create directory {}: {e}",
                    dir.display()
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| AppError::OutputError(format!("Failed to serialize snapshot: {e}")))?;

        tokio::fs::write(target, json).await.map_err(|e| {
            AppError::OutputError(format!(
                "Failed to write JSON file {}: {e}",
                target.display()
            ))
        })?;

        tracing::info!(path = %target.display(), "JSON data written");
        Ok(())
    }
}
