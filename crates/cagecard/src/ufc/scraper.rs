use super::parser::{ParseError, parse_event_urls, parse_fight_card};
use crate::types::FightCard;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use reqwest::Client;
use std::time::Duration;

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

    pub async fn fetch_event_urls(&self) -> Result<Vec<String>, ScraperError> {
        let url = format!("{}/events", self.base_url);
        log::info!("Fetching upcoming event list from {}...", url);
        let html = self.get_html(&url).await?;
        Ok(parse_event_urls(&html))
    }

    pub async fn fetch_fight_card(&self, url_or_path: &str) -> Result<FightCard, ScraperError> {
        let url = if url_or_path.starts_with("http") {
            url_or_path.to_string()
        } else {
            format!("{}{}", self.base_url, url_or_path)
        };
        log::info!("Fetching fight card: {}", url);
        let html = self.get_html(&url).await?;
        Ok(parse_fight_card(&html)?)
    }

    /// Fetch every upcoming card. Cards that fail to fetch or parse are
    /// skipped with a warning; the batch never aborts on one bad page.
    pub async fn fetch_all_cards(&self) -> Result<Vec<FightCard>, ScraperError> {
        let urls = self.fetch_event_urls().await?;
        log::info!("Fetching {} fight card(s)...", urls.len());

        let mut futures: FuturesUnordered<_> = urls
            .iter()
            .map(|url| async move { (url, self.fetch_fight_card(url).await) })
            .collect();

        let mut cards = Vec::new();
        while let Some((url, result)) = futures.next().await {
            match result {
                Ok(card) => cards.push(card),
                Err(e) => log::warn!("Failed to fetch fight card {}: {}", url, e),
            }
        }
        Ok(cards)
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
