pub mod config;
pub mod snapshot;
pub mod source;

pub use config::StoreConfig;
pub use snapshot::JsonSnapshotWriter;
pub use source::CsvSource;
