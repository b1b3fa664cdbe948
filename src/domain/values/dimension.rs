use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An independently scored axis of product desirability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Demand,
    Availability,
    Quality,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Demand,
        Dimension::Availability,
        Dimension::Quality,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Demand => "Demand",
            Dimension::Availability => "Availability",
            Dimension::Quality => "Quality",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Demand => write!(f, "demand"),
            Dimension::Availability => write!(f, "availability"),
            Dimension::Quality => write!(f, "quality"),
        }
    }
}

impl FromStr for Dimension {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "demand" => Ok(Dimension::Demand),
            "availability" => Ok(Dimension::Availability),
            "quality" => Ok(Dimension::Quality),
            _ => Err(format!("Unknown dimension: {s}")),
        }
    }
}
