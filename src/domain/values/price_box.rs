use crate::domain::values::money::Cents;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregate resale statistics for one condition over one window.
///
/// A box whose fields are all `None` is a legitimately empty box: the page
/// was scraped and nothing was listed or sold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBox {
    #[serde(default)]
    pub times_sold: Option<u32>,
    #[serde(default)]
    pub total_lots: Option<u32>,
    #[serde(default)]
    pub total_qty: Option<u32>,
    #[serde(default)]
    pub min_price: Option<Cents>,
    #[serde(default)]
    pub avg_price: Option<Cents>,
    #[serde(default)]
    pub qty_avg_price: Option<Cents>,
    #[serde(default)]
    pub max_price: Option<Cents>,
}

impl PriceBox {
    pub fn is_empty(&self) -> bool {
        self.times_sold.is_none()
            && self.total_lots.is_none()
            && self.total_qty.is_none()
            && self.min_price.is_none()
            && self.avg_price.is_none()
            && self.qty_avg_price.is_none()
            && self.max_price.is_none()
    }

    /// Average price, falling back to the quantity-weighted average.
    pub fn reference_price(&self) -> Option<Cents> {
        self.avg_price.or(self.qty_avg_price)
    }
}

/// Which of the four pricing boxes a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBoxKind {
    CurrentNew,
    CurrentUsed,
    SixMonthNew,
    SixMonthUsed,
}

impl PriceBoxKind {
    pub const ALL: [PriceBoxKind; 4] = [
        PriceBoxKind::CurrentNew,
        PriceBoxKind::CurrentUsed,
        PriceBoxKind::SixMonthNew,
        PriceBoxKind::SixMonthUsed,
    ];
}

impl fmt::Display for PriceBoxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceBoxKind::CurrentNew => write!(f, "current_new"),
            PriceBoxKind::CurrentUsed => write!(f, "current_used"),
            PriceBoxKind::SixMonthNew => write!(f, "six_month_new"),
            PriceBoxKind::SixMonthUsed => write!(f, "six_month_used"),
        }
    }
}

impl FromStr for PriceBoxKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current_new" => Ok(PriceBoxKind::CurrentNew),
            "current_used" => Ok(PriceBoxKind::CurrentUsed),
            "six_month_new" => Ok(PriceBoxKind::SixMonthNew),
            "six_month_used" => Ok(PriceBoxKind::SixMonthUsed),
            _ => Err(format!("Unknown price box: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_box_is_empty() {
        assert!(PriceBox::default().is_empty());
        let sold = PriceBox {
            times_sold: Some(0),
            ..Default::default()
        };
        assert!(!sold.is_empty());
    }

    #[test]
    fn test_reference_price_falls_back_to_qty_average() {
        let b = PriceBox {
            qty_avg_price: Some(Cents(1500)),
            ..Default::default()
        };
        assert_eq!(b.reference_price(), Some(Cents(1500)));
    }

    #[test]
    fn test_kind_display_roundtrips_through_from_str() {
        for kind in PriceBoxKind::ALL {
            assert_eq!(kind.to_string().parse::<PriceBoxKind>(), Ok(kind));
        }
    }
}
