//! Event and fighter statistics as presented on ufcstats.com.

mod parser;
pub mod scraper;
pub mod types;

pub use scraper::{ScraperError, WebScraper};

pub(crate) const BASE_URL: &str = "http://ufcstats.com";
