use std::io::Read;
use std::path::{Path, PathBuf};

use dossier_core::AppError;
use dossier_core::models::SourceItem;
use dossier_core::traits::SourceReader;

use crate::config::StoreConfig;

/// Reads source items from a headered CSV file.
///
/// Rows keep their file order. Short rows are accepted; a missing URL cell
/// yields an item with an empty URL, which the batch later rejects.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    name_column: String,
    url_column: String,
}

impl CsvSource {
    pub fn new(
        path: impl Into<PathBuf>,
        name_column: impl Into<String>,
        url_column: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name_column: name_column.into(),
            url_column: url_column.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.input, &config.name_column, &config.url_column)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse items from any CSV reader using this source's column mapping.
    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<SourceItem>, AppError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| AppError::InputError(format!("Failed to read CSV header: {e}")))?
            .clone();
        let name_idx = column_index(&headers, &self.name_column)?;
        let url_idx = column_index(&headers, &self.url_column)?;

        let mut items = Vec::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| {
                AppError::InputError(format!("Malformed CSV row {}: {e}", row + 2))
            })?;
            items.push(SourceItem::new(
                record.get(name_idx).unwrap_or_default(),
                record.get(url_idx).unwrap_or_default(),
            ));
        }

        Ok(items)
    }
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize, AppError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| AppError::InputError(format!("CSV is missing required column '{column}'")))
}

impl SourceReader for CsvSource {
    fn read_items(&self) -> Result<Vec<SourceItem>, AppError> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            AppError::InputError(format!(
                "Failed to open CSV file {}: {e}",
                self.path.display()
            ))
        })?;
        let items = self.parse(file)?;
        tracing::info!(
            path = %self.path.display(),
            items = items.len(),
            "CSV file parsed successfully"
        );
        Ok(items)
    }
}
