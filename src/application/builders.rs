//! Pure transforms from raw collaborator records to [`ProductAnalysisInput`].
//!
//! No I/O happens here: the same records and reference date always produce
//! the same bundle.

use crate::domain::analysis::input::{
    AvailabilityData, CommunitySignals, DemandData, MarketPricing, PricingData,
    ProductAnalysisInput, QualityData,
};
use crate::domain::entities::market_record::MarketRecord;
use crate::domain::entities::product::Product;
use crate::domain::entities::retirement::RetirementRecord;
use crate::domain::entities::sales_statistics::SalesStatistics;
use crate::domain::entities::sentiment::SentimentRecord;
use crate::domain::error::IncompleteProduct;
use crate::domain::values::price_box::PriceBoxKind;
use chrono::{Datelike, NaiveDate};

/// Records related to one product through its catalog number.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelatedRecords<'a> {
    pub market: Option<&'a MarketRecord>,
    pub sales: Option<&'a SalesStatistics>,
    pub sentiment: Option<&'a SentimentRecord>,
    pub retirement: Option<&'a RetirementRecord>,
}

/// Checks that the price guide for a catalogued product has all four boxes.
///
/// Products without a catalog number have no price guide to check and pass.
pub fn validate_completeness(
    product: &Product,
    market: Option<&MarketRecord>,
) -> Option<IncompleteProduct> {
    let catalog_number = product.catalog_number.as_ref()?;
    let missing = match market {
        Some(record) => record.missing_boxes(),
        None => PriceBoxKind::ALL.to_vec(),
    };
    if missing.is_empty() {
        return None;
    }
    Some(IncompleteProduct {
        product_id: product.product_id.clone(),
        catalog_number: catalog_number.clone(),
        missing,
    })
}

pub fn build_input(
    product: &Product,
    related: RelatedRecords<'_>,
    as_of: NaiveDate,
) -> ProductAnalysisInput {
    ProductAnalysisInput {
        product_id: product.product_id.clone(),
        name: product.name.clone(),
        catalog_number: product.catalog_number.clone(),
        as_of,
        pricing: build_pricing(product, related.market, related.sales),
        demand: build_demand(product, related.market, related.sales, related.sentiment),
        availability: build_availability(product, related.retirement, as_of),
        quality: build_quality(product, related.retirement),
    }
}

/// Market pricing exists only when every box has been scraped.
fn market_pricing(market: Option<&MarketRecord>) -> Option<MarketPricing> {
    let m = market?;
    Some(MarketPricing {
        current_new: m.current_new.clone()?,
        current_used: m.current_used.clone()?,
        six_month_new: m.six_month_new.clone()?,
        six_month_used: m.six_month_used.clone()?,
    })
}

pub fn build_pricing(
    product: &Product,
    market: Option<&MarketRecord>,
    sales: Option<&SalesStatistics>,
) -> PricingData {
    let primary = sales.and_then(|s| s.primary());
    PricingData {
        retail_price: product.retail_price.filter(|p| p.is_positive()),
        listing_price: product.price.filter(|p| p.is_positive()),
        market: market_pricing(market),
        transaction_count: primary.map(|t| t.total_transactions),
        price_volatility: primary.and_then(|t| t.volatility),
    }
}

pub fn build_demand(
    product: &Product,
    market: Option<&MarketRecord>,
    sales: Option<&SalesStatistics>,
    sentiment: Option<&SentimentRecord>,
) -> DemandData {
    let pricing = market_pricing(market);
    DemandData {
        transactions: sales.and_then(|s| s.primary()).cloned(),
        legacy_times_sold: pricing.as_ref().and_then(|p| p.six_month_new.times_sold),
        current_market_price: pricing.as_ref().and_then(|p| p.current_new.reference_price()),
        historical_market_price: pricing.as_ref().and_then(|p| p.six_month_new.reference_price()),
        retail_price: product.retail_price.filter(|p| p.is_positive()),
        current_lots: pricing.as_ref().and_then(|p| p.current_new.total_lots),
        community: sentiment.map(|s| CommunitySignals {
            post_count: s.post_count,
            total_score: s.total_score,
            average_score: s.average_score.or_else(|| {
                (s.post_count > 0).then(|| s.total_score as f64 / s.post_count as f64)
            }),
            total_comments: s.total_comments,
        }),
        units_sold: product.units_sold,
    }
}

/// Resolves retirement timing. An authoritative `year_retired` always wins;
/// the retiring-soon flag only supplies a year when that field is empty.
pub fn build_availability(
    product: &Product,
    retirement: Option<&RetirementRecord>,
    as_of: NaiveDate,
) -> AvailabilityData {
    let year_retired = retirement.and_then(|r| r.year_retired);
    let retiring_soon = retirement.map(|r| r.retiring_soon);
    let expected = retirement.and_then(|r| r.expected_retirement_date);
    let already_retired = year_retired.is_some_and(|y| y <= as_of.year());

    let days_until_retirement = if already_retired {
        None
    } else {
        expected.map(|date| (date - as_of).num_days())
    };

    let retirement_year = year_retired.or_else(|| {
        if retiring_soon == Some(true) {
            expected.map(|d| d.year())
        } else {
            None
        }
    });

    AvailabilityData {
        stock: product.stock,
        listing_status: product.listing_status,
        retiring_soon,
        expected_retirement_date: expected,
        days_until_retirement,
        year_released: retirement.and_then(|r| r.year_released),
        year_retired,
        retirement_year,
    }
}

pub fn build_quality(product: &Product, retirement: Option<&RetirementRecord>) -> QualityData {
    QualityData {
        rating: product.rating,
        review_count: product.review_count,
        rating_distribution: product.rating_distribution,
        brand: product.brand.clone().filter(|b| !b.trim().is_empty()),
        theme: retirement
            .and_then(|r| r.theme.clone())
            .filter(|t| !t.trim().is_empty()),
        parts_count: retirement.and_then(|r| r.parts_count),
    }
}
