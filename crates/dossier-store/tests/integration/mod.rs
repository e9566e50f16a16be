pub mod common;
mod snapshot_tests;
mod source_tests;
