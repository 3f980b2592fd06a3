use scraper::{ElementRef, Html, Selector};

use crate::types::{Bout, FightCard};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(String),
}

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collect the card link of every event listed on ufc.com/events,
/// absolutized against the site base URL. Cards without a link are
/// skipped with a warning.
pub fn parse_event_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("div.c-card-event--result__logo a").unwrap();

    let mut urls = Vec::new();
    for element in document.select(&link_selector) {
        match element.value().attr("href") {
            Some(href) if href.starts_with("http") => urls.push(href.to_string()),
            Some(href) => urls.push(format!("{}{}", super::BASE_URL, href)),
            None => log::warn!("Skipping event card link without href"),
        }
    }
    urls
}

/// Parse an event page into a fight card. Fight Night pages all print the
/// same base title, so the main event is appended to tell them apart.
pub fn parse_fight_card(html: &str) -> Result<FightCard, ParseError> {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("div.field--name-node-title").unwrap();
    let title = document
        .select(&title_selector)
        .next()
        .map(|e| normalize_whitespace(&elem_text(e)))
        .ok_or_else(|| ParseError::MissingField("event title".to_string()))?;

    let fight_selector = Selector::parse("div.c-listing-fight__content").unwrap();
    let corner_selector = Selector::parse("div.c-listing-fight__detail-corner-name").unwrap();

    let mut fights = Vec::new();
    for element in document.select(&fight_selector) {
        let corners: Vec<String> = element
            .select(&corner_selector)
            .map(|c| normalize_whitespace(&elem_text(c)))
            .collect();

        match corners.as_slice() {
            [red, blue, ..] => fights.push(Bout {
                red: red.clone(),
                blue: blue.clone(),
            }),
            _ => log::warn!("Skipping bout with {} corner name(s)", corners.len()),
        }
    }

    let title = match fights.first() {
        Some(main_event) => format!("{}: {} vs {}", title, main_event.red, main_event.blue),
        None => title,
    };

    Ok(FightCard {
        org: "UFC".to_string(),
        title,
        fights,
    })
}
