use super::parser::{
    ParseError, parse_event_card, parse_fighter, parse_fighter_urls, parse_upcoming_event_urls,
};
use super::types::{FightCard, Fighter};

use futures::StreamExt;
use futures::stream::{self, FuturesUnordered};
use reqwest::Client;
use std::time::Duration;

/// Default bound on in-flight fighter page fetches. The roster crawl is
/// tens of thousands of pages; unbounded fan-out would hammer the site.
pub const DEFAULT_CONCURRENCY: usize = 8;

const ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    base_url: String,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: super::BASE_URL.to_string(),
        })
    }

    pub async fn fetch_upcoming_event_urls(&self) -> Result<Vec<String>, ScraperError> {
        let url = format!("{}/statistics/events/upcoming", self.base_url);
        log::info!("Fetching upcoming event list from {}...", url);
        let html = self.get_html(&url).await?;
        Ok(parse_upcoming_event_urls(&html))
    }

    pub async fn fetch_event_card(&self, url_or_path: &str) -> Result<FightCard, ScraperError> {
        let url = self.absolutize(url_or_path);
        log::info!("Fetching event card: {}", url);
        let html = self.get_html(&url).await?;
        Ok(parse_event_card(&html)?)
    }

    /// Fetch every upcoming event card, skipping cards that fail with a
    /// warning rather than aborting the batch.
    pub async fn fetch_all_event_cards(&self) -> Result<Vec<FightCard>, ScraperError> {
        let urls = self.fetch_upcoming_event_urls().await?;
        log::info!("Fetching {} event card(s)...", urls.len());

        let mut futures: FuturesUnordered<_> = urls
            .iter()
            .map(|url| async move { (url, self.fetch_event_card(url).await) })
            .collect();

        let mut cards = Vec::new();
        while let Some((url, result)) = futures.next().await {
            match result {
                Ok(card) => cards.push(card),
                Err(e) => log::warn!("Failed to fetch event card {}: {}", url, e),
            }
        }
        Ok(cards)
    }

    /// Profile URLs of every fighter whose last name starts with `letter`.
    /// `page=all` collapses the per-letter pagination into one page.
    pub async fn fetch_fighter_urls(&self, letter: char) -> Result<Vec<String>, ScraperError> {
        let url = format!(
            "{}/statistics/fighters?char={}&page=all",
            self.base_url, letter
        );
        log::info!("Fetching fighter roster page '{}'...", letter);
        let html = self.get_html(&url).await?;
        Ok(parse_fighter_urls(&html))
    }

    /// Profile URLs of the whole roster, one page per letter of the
    /// alphabet. A failed letter page is skipped with a warning.
    pub async fn fetch_all_fighter_urls(&self) -> Vec<String> {
        let mut futures: FuturesUnordered<_> = ALPHABET
            .iter()
            .map(|&letter| async move { (letter, self.fetch_fighter_urls(letter).await) })
            .collect();

        let mut urls = Vec::new();
        while let Some((letter, result)) = futures.next().await {
            match result {
                Ok(page_urls) => urls.extend(page_urls),
                Err(e) => log::warn!("Failed to fetch roster page '{}': {}", letter, e),
            }
        }

        // Letter pages complete out of order
        urls.sort();
        urls.dedup();
        urls
    }

    pub async fn fetch_fighter(&self, url_or_path: &str) -> Result<Fighter, ScraperError> {
        let url = self.absolutize(url_or_path);
        log::info!("Fetching fighter: {}", url);
        let html = self.get_html(&url).await?;
        Ok(parse_fighter(&html)?)
    }

    /// Fetch fighter profiles with at most `concurrency` requests in
    /// flight. Individual failures are logged and skipped.
    pub async fn fetch_fighters(&self, urls: &[String], concurrency: usize) -> Vec<Fighter> {
        log::info!("Fetching {} fighter profile(s)...", urls.len());

        let mut results = stream::iter(
            urls.iter()
                .map(|url| async move { (url, self.fetch_fighter(url).await) }),
        )
        .buffer_unordered(concurrency.max(1));

        let mut fighters = Vec::new();
        while let Some((url, result)) = results.next().await {
            match result {
                Ok(fighter) => fighters.push(fighter),
                Err(e) => log::warn!("Failed to fetch fighter {}: {}", url, e),
            }
        }
        fighters
    }

    fn absolutize(&self, url_or_path: &str) -> String {
        if url_or_path.starts_with("http") {
            url_or_path.to_string()
        } else {
            format!("{}{}", self.base_url, url_or_path)
        }
    }

    async fn get_html(&self, url: &str) -> Result<String, ScraperError> {
        Ok(self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .error_for_status()?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?)
    }
}
