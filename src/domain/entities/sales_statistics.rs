use crate::domain::values::money::Cents;
use crate::domain::values::trend::TrendDirection;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Transaction statistics for one condition, computed from individual past sales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionStatistics {
    pub total_transactions: u32,
    #[serde(default)]
    pub total_quantity: Option<u32>,
    /// Sales per day over the observed window.
    #[serde(default)]
    pub sales_velocity: Option<f64>,
    #[serde(default)]
    pub recent_30d: Option<u32>,
    #[serde(default)]
    pub recent_60d: Option<u32>,
    #[serde(default)]
    pub recent_90d: Option<u32>,
    #[serde(default)]
    pub avg_price: Option<Cents>,
    #[serde(default)]
    pub median_price: Option<Cents>,
    /// Coefficient of variation of sale prices (stddev / mean).
    #[serde(default)]
    pub volatility: Option<f64>,
    #[serde(default)]
    pub price_trend: Option<TrendDirection>,
    #[serde(default)]
    pub price_change_pct: Option<f64>,
    /// Bounded 0–100 relative-strength indicator over recent sale prices.
    #[serde(default)]
    pub rsi: Option<f64>,
    #[serde(default)]
    pub volume_trend: Option<TrendDirection>,
    #[serde(default)]
    pub last_sale: Option<NaiveDate>,
}

/// Past-sales statistics for one catalog number, split by condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesStatistics {
    pub catalog_number: String,
    #[serde(default)]
    pub new: Option<ConditionStatistics>,
    #[serde(default)]
    pub used: Option<ConditionStatistics>,
    #[serde(default)]
    pub computed_at: Option<DateTime<Utc>>,
}

impl SalesStatistics {
    /// Sealed-condition statistics when they contain any sale, otherwise used.
    pub fn primary(&self) -> Option<&ConditionStatistics> {
        match (&self.new, &self.used) {
            (Some(new), _) if new.total_transactions > 0 => Some(new),
            (_, Some(used)) if used.total_transactions > 0 => Some(used),
            (Some(new), _) => Some(new),
            (None, used) => used.as_ref(),
        }
    }
}
