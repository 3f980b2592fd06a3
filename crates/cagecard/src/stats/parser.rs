use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::types::{Bout, FightCard, Fighter, FighterName, Outcome, Physique, RecordedFight};
use crate::types::OutcomeParseError;
use crate::utils::{parse_age, parse_digits, parse_height_cm};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Invalid outcome: {0}")]
    InvalidOutcome(#[from] OutcomeParseError),
}

static RE_EVENT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UFC\s*(\d+)").expect("invalid regex: event number"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collect the detail link of every event on the upcoming-events listing.
pub fn parse_upcoming_event_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("i.b-statistics__table-content a").unwrap();

    document
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Parse an event detail page into a fight card.
pub fn parse_event_card(html: &str) -> Result<FightCard, ParseError> {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("span.b-content__title-highlight").unwrap();
    let title = document
        .select(&title_selector)
        .next()
        .map(|e| normalize_whitespace(&elem_text(e)))
        .ok_or_else(|| ParseError::MissingField("event title".to_string()))?;

    let row_selector = Selector::parse("tr.js-fight-details-click").unwrap();
    let a_selector = Selector::parse("a").unwrap();

    let mut fights = Vec::new();
    for row in document.select(&row_selector) {
        let fighters: Vec<String> = row
            .select(&a_selector)
            .map(|a| normalize_whitespace(&elem_text(a)))
            .collect();

        match fighters.as_slice() {
            [red, blue, ..] => fights.push(Bout {
                red: red.clone(),
                blue: blue.clone(),
            }),
            _ => log::warn!("Skipping fight row with {} fighter link(s)", fighters.len()),
        }
    }

    Ok(FightCard {
        org: "UFC".to_string(),
        title: short_title(&title),
        fights,
    })
}

/// Fight Night cards share one page title, so they collapse to a single
/// label. Numbered cards keep their number, extracted as a whole token
/// rather than a fixed-width slice (which broke past UFC 999).
fn short_title(title: &str) -> String {
    if title.starts_with("UFC Fight Night") {
        return "Fight Night".to_string();
    }
    match RE_EVENT_NUMBER.captures(title) {
        Some(caps) => format!("UFC {}", &caps[1]),
        None => title.to_string(),
    }
}

/// Collect the profile link of every fighter row on an alphabetical roster
/// page. Header and spacer rows carry no link and are skipped.
pub fn parse_fighter_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("tr.b-statistics__table-row").unwrap();
    let a_selector = Selector::parse("a").unwrap();

    document
        .select(&row_selector)
        .filter_map(|row| {
            row.select(&a_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
        })
        .map(str::to_string)
        .collect()
}

/// Parse a fighter detail page: name, physical attributes, fight history.
pub fn parse_fighter(html: &str) -> Result<Fighter, ParseError> {
    let document = Html::parse_document(html);

    let name_selector = Selector::parse("span.b-content__title-highlight").unwrap();
    let name = document
        .select(&name_selector)
        .next()
        .map(|e| normalize_whitespace(&elem_text(e)))
        .ok_or_else(|| ParseError::MissingField("fighter name".to_string()))?;

    Ok(Fighter {
        name: FighterName::from_full(&name),
        physique: parse_physique(&document)?,
        record: parse_fight_history(&document),
    })
}

/// The info box lists attributes as `<i>Label:</i> value` items. Items are
/// matched by their printed label, so a reordered or missing entry does not
/// shift every field.
fn parse_physique(document: &Html) -> Result<Physique, ParseError> {
    let item_selector =
        Selector::parse("div.b-list__info-box_style_small-width li.b-list__box-list-item").unwrap();
    let label_selector = Selector::parse("i.b-list__box-item-title").unwrap();

    let today = Utc::now().date_naive();
    let mut physique = Physique::default();
    let mut items = 0;

    for item in document.select(&item_selector) {
        let Some(label_elem) = item.select(&label_selector).next() else {
            continue;
        };
        items += 1;

        let label_text = elem_text(label_elem);
        let label = normalize_whitespace(&label_text);
        let value = normalize_whitespace(&elem_text(item).replace(&label_text, ""));

        match label.as_str() {
            "Height:" => physique.height_cm = parse_height_cm(&value),
            "Weight:" => physique.weight_lbs = parse_digits(&value),
            "Reach:" => physique.reach_in = parse_digits(&value),
            "DOB:" => physique.age = parse_age(&value, today),
            _ => {}
        }
    }

    if items == 0 {
        return Err(ParseError::MissingField(
            "fighter physical attributes".to_string(),
        ));
    }
    Ok(physique)
}

/// Fight history rows carry 17 text cells; only the outcome flag, opponent,
/// method, round and time columns are kept. Bad rows are skipped with a
/// warning instead of failing the whole page.
fn parse_fight_history(document: &Html) -> Vec<RecordedFight> {
    let row_selector = Selector::parse("tr.js-fight-details-click").unwrap();

    let mut record = Vec::new();
    for row in document.select(&row_selector) {
        match parse_history_row(row) {
            Ok(fight) => record.push(fight),
            Err(e) => log::warn!("Skipping fight history row: {}", e),
        }
    }
    record
}

fn parse_history_row(row: ElementRef) -> Result<RecordedFight, ParseError> {
    let cell_selector = Selector::parse("p.b-fight-details__table-text").unwrap();
    let cells: Vec<String> = row
        .select(&cell_selector)
        .map(|c| normalize_whitespace(&elem_text(c)))
        .collect();

    let cell = |i: usize| -> Result<&String, ParseError> {
        cells
            .get(i)
            .ok_or_else(|| ParseError::MissingField(format!("fight history cell {i}")))
    };

    Ok(RecordedFight {
        outcome: Outcome::from_str(cell(0)?)?,
        opponent: cell(2)?.clone(),
        method: cell(13)?.clone(),
        // "--" on rows for fights that have not happened yet
        round: cell(15)?.parse().unwrap_or(0),
        time: cell(16)?.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upcoming_event_urls() {
        let html = r#"
            <table class="b-statistics__table-events">
                <tr class="b-statistics__table-row">
                    <td><i class="b-statistics__table-content">
                        <a href="http://ufcstats.com/event-details/abc123">UFC 310</a>
                        <span class="b-statistics__date">Dec 07, 2024</span>
                    </i></td>
                </tr>
                <tr class="b-statistics__table-row">
                    <td><i class="b-statistics__table-content">
                        <a href="http://ufcstats.com/event-details/def456">UFC Fight Night</a>
                    </i></td>
                </tr>
            </table>
        "#;

        let urls = parse_upcoming_event_urls(html);
        assert_eq!(
            urls,
            vec![
                "http://ufcstats.com/event-details/abc123".to_string(),
                "http://ufcstats.com/event-details/def456".to_string(),
            ]
        );
    }

    fn event_html(title: &str) -> String {
        format!(
            r#"
            <span class="b-content__title-highlight"> {title} </span>
            <table>
                <tr class="b-fight-details__table-row b-fight-details__table-row__hover js-fight-details-click">
                    <td><p class="b-fight-details__table-text">
                        <a href="http://ufcstats.com/fighter-details/1">Alex Pereira</a>
                    </p></td>
                    <td><p class="b-fight-details__table-text">
                        <a href="http://ufcstats.com/fighter-details/2">Jamahal Hill</a>
                    </p></td>
                </tr>
            </table>
        "#
        )
    }

    #[test]
    fn test_parse_event_card_numbered() {
        let card =
            parse_event_card(&event_html("UFC 300: Pereira vs. Hill")).expect("Failed to parse");

        assert_eq!(card.org, "UFC");
        assert_eq!(card.title, "UFC 300");
        assert_eq!(card.fights.len(), 1);
        assert_eq!(card.fights[0].red, "Alex Pereira");
        assert_eq!(card.fights[0].blue, "Jamahal Hill");
    }

    #[test]
    fn test_parse_event_card_fight_night() {
        let card = parse_event_card(&event_html("UFC Fight Night: Yan vs. Figueiredo"))
            .expect("Failed to parse");
        assert_eq!(card.title, "Fight Night");
    }

    #[test]
    fn test_short_title() {
        assert_eq!(short_title("UFC 300: Pereira vs. Hill"), "UFC 300");
        assert_eq!(short_title("UFC 1000: Somebody vs. Someone"), "UFC 1000");
        assert_eq!(short_title("UFC Fight Night: Yan vs. Figueiredo"), "Fight Night");
        assert_eq!(short_title("The Ultimate Fighter Finale"), "The Ultimate Fighter Finale");
    }

    #[test]
    fn test_parse_event_card_missing_title() {
        let err = parse_event_card("<p>nothing here</p>").unwrap_err();
        assert!(matches!(err, ParseError::MissingField(_)));
    }

    #[test]
    fn test_parse_fighter_urls_skips_rows_without_links() {
        let html = r#"
            <table>
                <tr class="b-statistics__table-row">
                    <th class="b-statistics__table-col">First</th>
                </tr>
                <tr class="b-statistics__table-row">
                    <td><a href="http://ufcstats.com/fighter-details/aaa">Tom</a></td>
                    <td><a href="http://ufcstats.com/fighter-details/aaa">Aaron</a></td>
                </tr>
                <tr class="b-statistics__table-row">
                    <td><a href="http://ufcstats.com/fighter-details/bbb">Danny</a></td>
                </tr>
            </table>
        "#;

        let urls = parse_fighter_urls(html);
        assert_eq!(
            urls,
            vec![
                "http://ufcstats.com/fighter-details/aaa".to_string(),
                "http://ufcstats.com/fighter-details/bbb".to_string(),
            ]
        );
    }

    const FIGHTER_HTML: &str = r#"
        <span class="b-content__title-highlight"> Silvana Gomez Juarez </span>
        <div class="b-list__info-box b-list__info-box_style_small-width js-guide">
            <ul class="b-list__box-list">
                <li class="b-list__box-list-item b-list__box-list-item_type_block">
                    <i class="b-list__box-item-title b-list__box-item-title_type_width">Height:</i>
                    5' 10"
                </li>
                <li class="b-list__box-list-item b-list__box-list-item_type_block">
                    <i class="b-list__box-item-title b-list__box-item-title_type_width">Weight:</i>
                    185 lbs.
                </li>
                <li class="b-list__box-list-item b-list__box-list-item_type_block">
                    <i class="b-list__box-item-title b-list__box-item-title_type_width">Reach:</i>
                    76"
                </li>
                <li class="b-list__box-list-item b-list__box-list-item_type_block">
                    <i class="b-list__box-item-title b-list__box-item-title_type_width">STANCE:</i>
                    Orthodox
                </li>
                <li class="b-list__box-list-item b-list__box-list-item_type_block">
                    <i class="b-list__box-item-title b-list__box-item-title_type_width">DOB:</i>
                    --
                </li>
            </ul>
        </div>
        <table>
            <tr class="b-fight-details__table-row b-fight-details__table-row__hover js-fight-details-click">
                <td><p class="b-fight-details__table-text"><i class="b-flag"><i class="b-flag__text">win</i></i></p></td>
                <td>
                    <p class="b-fight-details__table-text">Silvana Gomez Juarez</p>
                    <p class="b-fight-details__table-text">Liz Carmouche</p>
                </td>
                <td>
                    <p class="b-fight-details__table-text">UFC Fight Night</p>
                    <p class="b-fight-details__table-text">Oct 15, 2022</p>
                </td>
                <td><p class="b-fight-details__table-text">1</p></td>
                <td><p class="b-fight-details__table-text">0</p></td>
                <td><p class="b-fight-details__table-text">12</p></td>
                <td><p class="b-fight-details__table-text">35</p></td>
                <td><p class="b-fight-details__table-text">0</p></td>
                <td><p class="b-fight-details__table-text">0</p></td>
                <td><p class="b-fight-details__table-text">0</p></td>
                <td><p class="b-fight-details__table-text">0</p></td>
                <td><p class="b-fight-details__table-text">KO/TKO</p></td>
                <td><p class="b-fight-details__table-text">Punch</p></td>
                <td><p class="b-fight-details__table-text">1</p></td>
                <td><p class="b-fight-details__table-text">4:56</p></td>
            </tr>
        </table>
    "#;

    #[test]
    fn test_parse_fighter() {
        let fighter = parse_fighter(FIGHTER_HTML).expect("Failed to parse fighter");

        assert_eq!(fighter.name.first, "Silvana");
        assert_eq!(fighter.name.last, "Gomez Juarez");

        assert!((fighter.physique.height_cm - 177.8).abs() < 0.01);
        assert_eq!(fighter.physique.weight_lbs, 185);
        assert_eq!(fighter.physique.reach_in, 76);
        assert_eq!(fighter.physique.age, 0);

        assert_eq!(fighter.record.len(), 1);
        let fight = &fighter.record[0];
        assert_eq!(fight.outcome, Outcome::Win);
        assert_eq!(fight.opponent, "Liz Carmouche");
        assert_eq!(fight.method, "KO/TKO");
        assert_eq!(fight.round, 1);
        assert_eq!(fight.time, "4:56");
    }

    #[test]
    fn test_parse_fighter_missing_name() {
        let err = parse_fighter("<p>nothing</p>").unwrap_err();
        assert!(matches!(err, ParseError::MissingField(_)));
    }

    #[test]
    fn test_parse_fighter_missing_info_box() {
        let html = r#"<span class="b-content__title-highlight">Jon Jones</span>"#;
        let err = parse_fighter(html).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(_)));
    }

    #[test]
    fn test_parse_physique_is_order_independent() {
        let html = r#"
            <span class="b-content__title-highlight">Jon Jones</span>
            <div class="b-list__info-box b-list__info-box_style_small-width js-guide">
                <ul class="b-list__box-list">
                    <li class="b-list__box-list-item">
                        <i class="b-list__box-item-title">Weight:</i> 205 lbs.
                    </li>
                    <li class="b-list__box-list-item">
                        <i class="b-list__box-item-title">Height:</i> 6' 4"
                    </li>
                </ul>
            </div>
        "#;

        let fighter = parse_fighter(html).expect("Failed to parse fighter");
        assert!((fighter.physique.height_cm - 193.04).abs() < 0.01);
        assert_eq!(fighter.physique.weight_lbs, 205);
        assert_eq!(fighter.physique.reach_in, 0);
        assert_eq!(fighter.physique.age, 0);
    }

    #[test]
    fn test_history_row_upcoming_fight() {
        let html = r#"
            <span class="b-content__title-highlight">Jon Jones</span>
            <div class="b-list__info-box b-list__info-box_style_small-width js-guide">
                <ul><li class="b-list__box-list-item">
                    <i class="b-list__box-item-title">Height:</i> 6' 4"
                </li></ul>
            </div>
            <table>
                <tr class="js-fight-details-click">
                    <td><p class="b-fight-details__table-text">next</p></td>
                    <td>
                        <p class="b-fight-details__table-text">Jon Jones</p>
                        <p class="b-fight-details__table-text">Tom Aspinall</p>
                    </td>
                    <td>
                        <p class="b-fight-details__table-text">UFC 309</p>
                        <p class="b-fight-details__table-text">Nov 16, 2024</p>
                    </td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                    <td><p class="b-fight-details__table-text">--</p></td>
                </tr>
            </table>
        "#;

        let fighter = parse_fighter(html).expect("Failed to parse fighter");
        assert_eq!(fighter.record.len(), 1);
        let fight = &fighter.record[0];
        assert_eq!(fight.outcome, Outcome::Upcoming);
        assert_eq!(fight.opponent, "Tom Aspinall");
        assert_eq!(fight.method, "--");
        assert_eq!(fight.round, 0);
        assert_eq!(fight.time, "--");
    }

    #[test]
    fn test_history_skips_malformed_rows() {
        let html = r#"
            <span class="b-content__title-highlight">Jon Jones</span>
            <div class="b-list__info-box b-list__info-box_style_small-width js-guide">
                <ul><li class="b-list__box-list-item">
                    <i class="b-list__box-item-title">Height:</i> 6' 4"
                </li></ul>
            </div>
            <table>
                <tr class="js-fight-details-click">
                    <td><p class="b-fight-details__table-text">win</p></td>
                </tr>
            </table>
        "#;

        let fighter = parse_fighter(html).expect("Failed to parse fighter");
        assert!(fighter.record.is_empty());
    }
}
