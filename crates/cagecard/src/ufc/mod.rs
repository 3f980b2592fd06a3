//! Upcoming event cards as presented on ufc.com.

mod parser;
pub mod scraper;

pub use scraper::{ScraperError, WebScraper};

pub(crate) const BASE_URL: &str = "https://www.ufc.com";
