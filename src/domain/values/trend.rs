use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a price or volume series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Stable,
    Decreasing,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Stable => write!(f, "stable"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
        }
    }
}

impl FromStr for TrendDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "increasing" | "up" => Ok(TrendDirection::Increasing),
            "stable" | "flat" => Ok(TrendDirection::Stable),
            "decreasing" | "down" => Ok(TrendDirection::Decreasing),
            _ => Err(format!("Unknown trend direction: {s}")),
        }
    }
}
