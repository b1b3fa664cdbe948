use crate::domain::values::money::Cents;
use crate::domain::values::retirement_status::RetirementStatus;
use serde::{Deserialize, Serialize};

/// Which price the intrinsic value was anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorSource {
    RetailPrice,
    SecondaryMarket,
}

/// Every factor that went into an intrinsic value and buy price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBreakdown {
    pub anchor: Cents,
    pub anchor_source: AnchorSource,
    pub retirement_status: RetirementStatus,
    pub retirement_multiplier: f64,
    pub demand_multiplier: f64,
    pub scarcity_multiplier: f64,
    pub liquidity_multiplier: f64,
    pub volatility_multiplier: f64,
    pub theme_multiplier: f64,
    pub parts_value_multiplier: f64,
    pub intrinsic_value: Cents,
    pub margin_of_safety: f64,
    pub adjustments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedBuyPrice {
    pub price: Cents,
    pub reasoning: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ValueBreakdown>,
}

/// Outcome of a value calculation: a price, or an explicit refusal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Valuation {
    Priced(RecommendedBuyPrice),
    Rejected { reason: String },
}

impl Valuation {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Valuation::Rejected {
            reason: reason.into(),
        }
    }

    pub fn price(&self) -> Option<&RecommendedBuyPrice> {
        match self {
            Valuation::Priced(p) => Some(p),
            Valuation::Rejected { .. } => None,
        }
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Valuation::Priced(_) => None,
            Valuation::Rejected { reason } => Some(reason),
        }
    }
}
