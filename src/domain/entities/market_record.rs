use crate::domain::values::price_box::{PriceBox, PriceBoxKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Secondary-market price guide for one catalog number.
///
/// `None` for a box means the box was never scraped. Analysis refuses to run
/// until all four are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub catalog_number: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub current_new: Option<PriceBox>,
    #[serde(default)]
    pub current_used: Option<PriceBox>,
    #[serde(default)]
    pub six_month_new: Option<PriceBox>,
    #[serde(default)]
    pub six_month_used: Option<PriceBox>,
    #[serde(default)]
    pub scraped_at: Option<DateTime<Utc>>,
}

impl MarketRecord {
    pub fn new(catalog_number: impl Into<String>) -> Self {
        Self {
            catalog_number: catalog_number.into(),
            title: None,
            current_new: None,
            current_used: None,
            six_month_new: None,
            six_month_used: None,
            scraped_at: None,
        }
    }

    pub fn get(&self, kind: PriceBoxKind) -> Option<&PriceBox> {
        match kind {
            PriceBoxKind::CurrentNew => self.current_new.as_ref(),
            PriceBoxKind::CurrentUsed => self.current_used.as_ref(),
            PriceBoxKind::SixMonthNew => self.six_month_new.as_ref(),
            PriceBoxKind::SixMonthUsed => self.six_month_used.as_ref(),
        }
    }

    /// Boxes that have not been scraped, in canonical order.
    pub fn missing_boxes(&self) -> Vec<PriceBoxKind> {
        PriceBoxKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }
}
