//! Normalized per-product bundle consumed by the analyzers and the value
//! calculator. Built once at the aggregation boundary; read-only afterwards.

use crate::domain::entities::sales_statistics::ConditionStatistics;
use crate::domain::values::listing_status::ListingStatus;
use crate::domain::values::money::Cents;
use crate::domain::values::price_box::PriceBox;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAnalysisInput {
    pub product_id: String,
    pub name: String,
    pub catalog_number: Option<String>,
    /// Reference date for every "days until" / "years since" calculation.
    pub as_of: NaiveDate,
    pub pricing: PricingData,
    pub demand: DemandData,
    pub availability: AvailabilityData,
    pub quality: QualityData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingData {
    pub retail_price: Option<Cents>,
    /// Current asking price on the selling platform, compared with the buy price.
    pub listing_price: Option<Cents>,
    pub market: Option<MarketPricing>,
    pub transaction_count: Option<u32>,
    pub price_volatility: Option<f64>,
}

impl PricingData {
    /// Current asking price for a sealed copy on the secondary market.
    pub fn current_market_price(&self) -> Option<Cents> {
        self.market.as_ref().and_then(|m| m.current_new.reference_price())
    }

    /// Six-month realised price for a sealed copy on the secondary market.
    pub fn historical_market_price(&self) -> Option<Cents> {
        self.market.as_ref().and_then(|m| m.six_month_new.reference_price())
    }
}

/// The four validated pricing boxes. Any of them may be empty, none missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketPricing {
    pub current_new: PriceBox,
    pub current_used: PriceBox,
    pub six_month_new: PriceBox,
    pub six_month_used: PriceBox,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandData {
    /// Transaction-level statistics for the primary condition.
    pub transactions: Option<ConditionStatistics>,
    /// Six-month sealed `times_sold`, used only when `transactions` is absent.
    pub legacy_times_sold: Option<u32>,
    pub current_market_price: Option<Cents>,
    pub historical_market_price: Option<Cents>,
    pub retail_price: Option<Cents>,
    pub current_lots: Option<u32>,
    pub community: Option<CommunitySignals>,
    pub units_sold: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunitySignals {
    pub post_count: u32,
    pub total_score: i64,
    pub average_score: Option<f64>,
    pub total_comments: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityData {
    pub stock: Option<u64>,
    pub listing_status: Option<ListingStatus>,
    /// `None` when no retirement record exists for the catalog number.
    pub retiring_soon: Option<bool>,
    pub expected_retirement_date: Option<NaiveDate>,
    pub days_until_retirement: Option<i64>,
    pub year_released: Option<i32>,
    /// Authoritative retirement year from the catalog.
    pub year_retired: Option<i32>,
    /// Year used for time-since-retirement math: `year_retired` when known,
    /// otherwise the expected retirement year of a retiring-soon item.
    pub retirement_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityData {
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub rating_distribution: Option<[u32; 5]>,
    pub brand: Option<String>,
    pub theme: Option<String>,
    pub parts_count: Option<u32>,
}
