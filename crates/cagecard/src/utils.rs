use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::stats::types::Fighter;
use crate::types::FightCard;

static RE_FEET_INCHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\d+)'\s*(\d+)\s*""#).expect("invalid regex: feet and inches"));

const CM_PER_FOOT: f64 = 30.48;
const CM_PER_INCH: f64 = 2.54;
const DAYS_PER_YEAR: f64 = 365.25;

pub fn feet_inches_to_cm(feet: u32, inches: u32) -> f64 {
    feet as f64 * CM_PER_FOOT + inches as f64 * CM_PER_INCH
}

/// Parse a printed height such as `5' 10"` into centimeters. Feet and
/// inches are extracted as independent fields, so `7' 0"` and double-digit
/// inch values are unambiguous. Returns 0.0 for the `--` sentinel or
/// unrecognized text.
pub fn parse_height_cm(text: &str) -> f64 {
    let text = text.trim();
    if text == "--" {
        return 0.0;
    }
    match RE_FEET_INCHES.captures(text) {
        Some(caps) => {
            let feet: u32 = caps[1].parse().unwrap_or(0);
            let inches: u32 = caps[2].parse().unwrap_or(0);
            feet_inches_to_cm(feet, inches)
        }
        None => {
            log::warn!("Unrecognized height: '{}'", text);
            0.0
        }
    }
}

/// Strip a printed value such as `185 lbs.` or `76"` down to its digits.
/// Returns 0 for the `--` sentinel or when no digits are present.
pub fn parse_digits(text: &str) -> u32 {
    let text = text.trim();
    if text == "--" {
        return 0;
    }
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Age in whole years at `today`, from a DOB printed as `Mon DD, YYYY`
/// (optionally prefixed with `DOB:`). Returns 0 for the `--` sentinel or
/// a date that does not parse.
pub fn parse_age(text: &str, today: NaiveDate) -> u32 {
    let text = text.trim();
    if text == "--" {
        return 0;
    }
    let dob_text = text.strip_prefix("DOB:").map(str::trim).unwrap_or(text);
    match NaiveDate::parse_from_str(dob_text, "%b %d, %Y") {
        Ok(dob) => {
            let days = (today - dob).num_days();
            if days <= 0 {
                0
            } else {
                (days as f64 / DAYS_PER_YEAR) as u32
            }
        }
        Err(e) => {
            log::warn!("Unrecognized DOB '{}': {}", dob_text, e);
            0
        }
    }
}

/// Split a full name into the first name and everything after it.
pub fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or("").to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

#[derive(Debug, Default)]
pub struct RosterFilter {
    pub letter: Option<char>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl RosterFilter {
    pub fn apply(self, mut urls: Vec<String>) -> Vec<String> {
        if let Some(off) = self.offset {
            urls = urls.into_iter().skip(off).collect();
        }
        if let Some(lim) = self.limit {
            urls.truncate(lim);
        }
        urls
    }

    pub fn validate(self) -> Result<Self, String> {
        if let Some(letter) = self.letter
            && !letter.is_ascii_alphabetic()
        {
            return Err(format!("Letter must be a-z, got '{letter}'"));
        }
        if self.offset.is_some_and(|o| o == 0) {
            return Err("Offset must be greater than 0".to_string());
        }
        if self.limit.is_some_and(|l| l == 0) {
            return Err("Limit must be greater than 0".to_string());
        }
        Ok(self)
    }
}

#[derive(Debug)]
pub struct CardStats {
    pub cards: usize,
    pub bouts: usize,
}

impl CardStats {
    pub fn from_cards(cards: &[FightCard]) -> CardStats {
        CardStats {
            cards: cards.len(),
            bouts: cards.iter().map(|c| c.fights.len()).sum(),
        }
    }
}

impl std::fmt::Display for CardStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Fight cards: {}", self.cards)?;
        writeln!(f, "  Bouts:       {}", self.bouts)
    }
}

#[derive(Debug)]
pub struct RosterStats {
    pub fighters: usize,
    pub recorded_fights: usize,
}

impl RosterStats {
    pub fn from_fighters(fighters: &[Fighter]) -> RosterStats {
        RosterStats {
            fighters: fighters.len(),
            recorded_fights: fighters.iter().map(|f| f.record.len()).sum(),
        }
    }
}

impl std::fmt::Display for RosterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Fighters:        {}", self.fighters)?;
        writeln!(f, "  Recorded fights: {}", self.recorded_fights)
    }
}
