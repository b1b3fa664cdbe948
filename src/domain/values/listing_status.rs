use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the product can still be bought from the retail platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Listed and purchasable.
    Active,
    /// Listed but out of stock.
    SoldOut,
    /// Removed from the platform.
    Delisted,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingStatus::Active => write!(f, "active"),
            ListingStatus::SoldOut => write!(f, "sold_out"),
            ListingStatus::Delisted => write!(f, "delisted"),
        }
    }
}

impl FromStr for ListingStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ListingStatus::Active),
            "sold_out" | "soldout" => Ok(ListingStatus::SoldOut),
            "delisted" => Ok(ListingStatus::Delisted),
            _ => Err(format!("Unknown listing status: {s}")),
        }
    }
}
