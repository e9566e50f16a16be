use dossier_core::AppError;
use dossier_core::models::SourceItem;
use dossier_core::traits::SourceReader;
use dossier_store::{CsvSource, StoreConfig};

use crate::integration::common::write_temp_file;

fn csv_source(path: std::path::PathBuf) -> CsvSource {
    let config = StoreConfig {
        input: path,
        ..StoreConfig::default()
    };
    CsvSource::from_config(&config)
}

#[test]
fn reads_items_from_file() {
    let (path, _dir) = write_temp_file(
        "companies.csv",
        "Company Name,YC URL\n\
         Acme,https://example.com/companies/acme\n\
         \"Globex, Inc\",https://example.com/companies/globex\n",
    );

    let items = csv_source(path).read_items().unwrap();

    assert_eq!(
        items,
        vec![
            SourceItem::new("Acme", "https://example.com/companies/acme"),
            SourceItem::new("Globex, Inc", "https://example.com/companies/globex"),
        ]
    );
}

#[test]
fn empty_file_with_header_yields_no_items() {
    let (path, _dir) = write_temp_file("companies.csv", "Company Name,YC URL\n");

    let items = csv_source(path).read_items().unwrap();

    assert!(items.is_empty());
}

#[test]
fn missing_file_is_input_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = csv_source(dir.path().join("nope.csv"))
        .read_items()
        .unwrap_err();

    assert!(matches!(err, AppError::InputError(_)));
    assert!(err.is_fatal());
}
