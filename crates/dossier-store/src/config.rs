use std::path::PathBuf;

use dossier_core::AppError;

pub const DEFAULT_INPUT: &str = "data/companies.csv";
pub const DEFAULT_OUTPUT: &str = "out/profiles.json";
pub const DEFAULT_NAME_COLUMN: &str = "Company Name";
pub const DEFAULT_URL_COLUMN: &str = "YC URL";

/// Locations and column mapping for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub name_column: String,
    pub url_column: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            url_column: DEFAULT_URL_COLUMN.to_string(),
        }
    }
}

impl StoreConfig {
    /// Read configuration from environment variables.
    ///
    /// - `DOSSIER_INPUT` (optional, defaults to `data/companies.csv`)
    /// - `DOSSIER_OUTPUT` (optional, defaults to `out/profiles.json`)
    /// - `DOSSIER_NAME_COLUMN` (optional, defaults to `Company Name`)
    /// - `DOSSIER_URL_COLUMN` (optional, defaults to `YC URL`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let input = lookup("DOSSIER_INPUT")
            .map(PathBuf::from)
            .unwrap_or(defaults.input);
        let output = lookup("DOSSIER_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or(defaults.output);
        let name_column = lookup("DOSSIER_NAME_COLUMN").unwrap_or(defaults.name_column);
        let url_column = lookup("DOSSIER_URL_COLUMN").unwrap_or(defaults.url_column);

        let config = Self {
            input,
            output,
            name_column,
            url_column,
        };
        config.validate()?;
        Ok(config)
    }

    /// Column names must be non-blank and distinct.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name_column.trim().is_empty() || self.url_column.trim().is_empty() {
            return Err(AppError::ConfigError(
                "Name and URL column names must not be empty".into(),
            ));
        }
        if self.name_column == self.url_column {
            return Err(AppError::ConfigError(format!(
                "Name and URL columns must differ (both '{}')",
                self.name_column
            )));
        }
        Ok(())
    }
}
