use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a strategy recommends doing with a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    StrongBuy,
    Buy,
    Hold,
    Pass,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::StrongBuy => write!(f, "strong_buy"),
            Action::Buy => write!(f, "buy"),
            Action::Hold => write!(f, "hold"),
            Action::Pass => write!(f, "pass"),
        }
    }
}

impl FromStr for Action {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strong_buy" => Ok(Action::StrongBuy),
            "buy" => Ok(Action::Buy),
            "hold" => Ok(Action::Hold),
            "pass" => Ok(Action::Pass),
            _ => Err(format!("Unknown action: {s}")),
        }
    }
}

/// How soon the buyer should act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    Moderate,
    Low,
    NoRush,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Urgent => write!(f, "urgent"),
            Urgency::Moderate => write!(f, "moderate"),
            Urgency::Low => write!(f, "low"),
            Urgency::NoRush => write!(f, "no_rush"),
        }
    }
}
