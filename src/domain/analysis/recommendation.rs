use crate::domain::analysis::score::{AnalysisScore, DimensionalScores};
use crate::domain::analysis::valuation::RecommendedBuyPrice;
use crate::domain::values::action::{Action, Urgency};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Final buy/hold/pass verdict for one product under one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecommendation {
    pub product_id: String,
    pub overall: AnalysisScore,
    pub dimensions: DimensionalScores,
    pub action: Action,
    pub strategy: String,
    pub urgency: Urgency,
    /// Estimated return on the recommended buy price, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_roi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_horizon: Option<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_buy_price: Option<RecommendedBuyPrice>,
    pub analyzed_at: DateTime<Utc>,
}

/// A product whose scoring failed inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub product_id: String,
    pub error: String,
}

/// Result of a batch analysis: successes keyed by product id, plus failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysis {
    pub recommendations: BTreeMap<String, ProductRecommendation>,
    pub failures: Vec<BatchFailure>,
}
