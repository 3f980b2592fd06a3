use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[error("Invalid outcome '{0}'. Accepted values: 'win', 'loss', 'draw', 'nc', 'next'")]
pub struct OutcomeParseError(String);

/// Result of a fight from the perspective of the fighter whose page it
/// appears on. Upcoming bouts are flagged "next" on ufcstats.com.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    NoContest,
    Upcoming,
}

impl FromStr for Outcome {
    type Err = OutcomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" => Ok(Outcome::Win),
            "loss" => Ok(Outcome::Loss),
            "draw" => Ok(Outcome::Draw),
            "nc" | "no contest" => Ok(Outcome::NoContest),
            "next" => Ok(Outcome::Upcoming),
            _ => Err(OutcomeParseError(s.to_string())),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Loss => write!(f, "Loss"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::NoContest => write!(f, "No Contest"),
            Outcome::Upcoming => write!(f, "Next"),
        }
    }
}

/// One scheduled fight: the red and blue corner names as printed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bout {
    pub red: String,
    pub blue: String,
}

impl Display for Bout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {}", self.red, self.blue)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightCard {
    pub org: String,
    pub title: String,
    pub fights: Vec<Bout>,
}

impl Display for FightCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "┌─ {} ─ {}", self.org, self.title)?;
        for (i, bout) in self.fights.iter().enumerate() {
            writeln!(f, "│ {:>2}. {}", i + 1, bout)?;
        }
        writeln!(f, "└─ {} bout(s)", self.fights.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterName {
    pub first: String,
    pub last: String,
}

impl FighterName {
    /// Split a printed full name into first name and everything after it.
    /// Multi-word last names ("Silvana Gomez Juarez") stay together.
    pub fn from_full(name: &str) -> Self {
        let (first, last) = crate::utils::split_name(name);
        Self { first, last }
    }

    pub fn full(&self) -> String {
        if self.last.is_empty() {
            self.first.clone()
        } else {
            format!("{} {}", self.first, self.last)
        }
    }
}

impl Display for FighterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full())
    }
}
