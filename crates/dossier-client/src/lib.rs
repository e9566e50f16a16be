pub mod extractor;
pub mod fetcher;

pub use extractor::{ScraperExtractor, parse_leading_int};
pub use fetcher::ReqwestFetcher;
