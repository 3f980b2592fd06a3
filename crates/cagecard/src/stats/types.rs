use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub use crate::types::{Bout, FightCard, FighterName, Outcome};

/// Physical attributes as printed on a fighter page. Each field falls back
/// to zero when the page prints the `--` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Physique {
    pub height_cm: f64,
    pub weight_lbs: u32,
    pub reach_in: u32,
    pub age: u32,
}

impl Display for Physique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} cm, {} lbs, {}\" reach, age {}",
            self.height_cm, self.weight_lbs, self.reach_in, self.age
        )
    }
}

/// One row of a fighter's fight history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedFight {
    pub outcome: Outcome,
    pub opponent: String,
    pub method: String,
    pub round: u32,
    pub time: String,
}

impl Display for RecordedFight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] vs {} by {} (R{} {})",
            self.outcome, self.opponent, self.method, self.round, self.time
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub name: FighterName,
    pub physique: Physique,
    pub record: Vec<RecordedFight>,
}

impl Display for Fighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "┌─ {}", self.name)?;
        writeln!(f, "│  {}", self.physique)?;
        for fight in &self.record {
            writeln!(f, "│  {}", fight)?;
        }
        writeln!(f, "└─ {} recorded fight(s)", self.record.len())
    }
}
