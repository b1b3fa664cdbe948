//! Value calculator.
//!
//! Anchors on the original retail price, applies multiplicative adjustments
//! for retirement, demand, scarcity, liquidity and volatility, then takes a
//! strategy margin of safety off the resulting intrinsic value. Degenerate or
//! anchorless inputs are rejected with a reason instead of priced.

use chrono::Datelike;

use crate::application::analyzers::quality::is_premium_theme;
use crate::domain::analysis::input::{AvailabilityData, ProductAnalysisInput, QualityData};
use crate::domain::analysis::score::DimensionalScores;
use crate::domain::analysis::valuation::{
    AnchorSource, RecommendedBuyPrice, ValueBreakdown, Valuation,
};
use crate::domain::values::money::Cents;
use crate::domain::values::retirement_status::RetirementStatus;

/// Tunables for the price model.
#[derive(Debug, Clone)]
pub struct ValueConfig {
    /// Sets older than this (years since release) are assumed retired when
    /// no retirement data exists.
    pub retirement_age_years: i32,
    pub retiring_soon_multiplier: f64,
    /// Premium right after retirement; decays toward `retired_floor_multiplier`.
    pub retired_peak_multiplier: f64,
    pub retired_floor_multiplier: f64,
    /// Years for the post-retirement premium to decay by a factor of e.
    pub retired_decay_years: f64,
    /// Multiplier for a set assumed retired from its age alone.
    pub estimated_retired_multiplier: f64,
    /// Demand multiplier spans `[1 - spread, 1 + spread]` over scores 0–100.
    pub demand_multiplier_spread: f64,
    /// Asking price / retail above which zero verified sales is degenerate.
    pub unverified_premium_limit: f64,
    pub premium_theme_multiplier: f64,
    /// Retail cents per piece at or below which a set counts as good value.
    pub cheap_cents_per_part: f64,
    /// Retail cents per piece above which a set counts as poor value.
    pub expensive_cents_per_part: f64,
    pub min_margin: f64,
    pub max_margin: f64,
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            retirement_age_years: 3,
            retiring_soon_multiplier: 1.08,
            retired_peak_multiplier: 1.30,
            retired_floor_multiplier: 1.10,
            retired_decay_years: 4.0,
            estimated_retired_multiplier: 1.15,
            demand_multiplier_spread: 0.15,
            unverified_premium_limit: 1.5,
            premium_theme_multiplier: 1.05,
            cheap_cents_per_part: 8.0,
            expensive_cents_per_part: 15.0,
            min_margin: 0.10,
            max_margin: 0.50,
        }
    }
}

/// Retirement phase plus whole years since retirement when known.
///
/// Precedence: authoritative retirement year, then the retiring-soon flag
/// (or a passed expected date), then an age-based estimate.
pub fn retirement_status(
    availability: &AvailabilityData,
    current_year: i32,
    retirement_age_years: i32,
) -> (RetirementStatus, Option<i32>) {
    if let Some(year) = availability.year_retired {
        if year <= current_year {
            return (RetirementStatus::Retired, Some(current_year - year));
        }
        return (RetirementStatus::RetiringSoon, None);
    }
    if availability.days_until_retirement.is_some_and(|d| d < 0) {
        let years = availability.retirement_year.map(|y| (current_year - y).max(0));
        return (RetirementStatus::Retired, years.or(Some(0)));
    }
    if availability.retiring_soon == Some(true) {
        return (RetirementStatus::RetiringSoon, None);
    }
    if let Some(released) = availability.year_released {
        if current_year - released > retirement_age_years {
            return (RetirementStatus::Retired, None);
        }
    }
    (RetirementStatus::Active, None)
}

#[derive(Debug, Clone, Default)]
pub struct ValueCalculator {
    config: ValueConfig,
}

impl ValueCalculator {
    pub fn new(config: ValueConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValueConfig {
        &self.config
    }

    pub fn retirement_multiplier(
        &self,
        status: RetirementStatus,
        years_retired: Option<i32>,
    ) -> f64 {
        let c = &self.config;
        match (status, years_retired) {
            (RetirementStatus::Active, _) => 1.0,
            (RetirementStatus::RetiringSoon, _) => c.retiring_soon_multiplier,
            (RetirementStatus::Retired, Some(years)) => {
                let decay = (-(years.max(0) as f64) / c.retired_decay_years).exp();
                c.retired_floor_multiplier
                    + (c.retired_peak_multiplier - c.retired_floor_multiplier) * decay
            }
            (RetirementStatus::Retired, None) => c.estimated_retired_multiplier,
        }
    }

    pub fn demand_multiplier(&self, demand_score: Option<f64>) -> f64 {
        match demand_score {
            Some(score) => {
                let spread = self.config.demand_multiplier_spread;
                1.0 - spread + score.clamp(0.0, 100.0) / 100.0 * 2.0 * spread
            }
            None => 1.0,
        }
    }

    /// Thin-market penalty from the verified transaction count.
    pub fn liquidity_multiplier(transaction_count: Option<u32>) -> f64 {
        match transaction_count {
            None => 1.0,
            Some(0) => 0.80,
            Some(1..=2) => 0.90,
            Some(3..=9) => 0.95,
            Some(_) => 1.0,
        }
    }

    /// Penalty for erratic sale prices (coefficient of variation).
    pub fn volatility_multiplier(volatility: Option<f64>) -> f64 {
        match volatility {
            Some(v) if v > 0.40 => 0.85,
            Some(v) if v > 0.25 => 0.93,
            _ => 1.0,
        }
    }

    pub fn theme_multiplier(&self, quality: &QualityData) -> f64 {
        match &quality.theme {
            Some(theme) if is_premium_theme(theme) => self.config.premium_theme_multiplier,
            _ => 1.0,
        }
    }

    /// Parts-per-dollar value at retail: cheap-per-piece sets hold value
    /// better than expensive-per-piece ones.
    pub fn parts_value_multiplier(&self, retail: Option<Cents>, parts_count: Option<u32>) -> f64 {
        let (Some(retail), Some(parts)) = (retail, parts_count.filter(|p| *p > 0)) else {
            return 1.0;
        };
        let per_part = retail.as_f64() / parts as f64;
        if per_part <= self.config.cheap_cents_per_part {
            1.05
        } else if per_part > self.config.expensive_cents_per_part {
            0.95
        } else {
            1.0
        }
    }

    /// Adjust the strategy's base margin from confidence, availability and demand.
    pub fn margin_of_safety(
        &self,
        base: f64,
        scores: &DimensionalScores,
        adjustments: &mut Vec<String>,
    ) -> f64 {
        let mut margin = base;
        let confidences: Vec<f64> = scores.present().map(|(_, s)| s.confidence).collect();
        let mean_confidence = if confidences.is_empty() {
            0.0
        } else {
            confidences.iter().sum::<f64>() / confidences.len() as f64
        };
        if mean_confidence < 0.5 {
            margin += 0.05;
            adjustments.push("+5% margin: low data confidence".to_string());
        }
        if let Some(a) = &scores.availability {
            if a.value >= 80.0 {
                margin -= 0.05;
                adjustments.push("-5% margin: high scarcity".to_string());
            }
        }
        if let Some(d) = &scores.demand {
            if d.value >= 75.0 {
                margin -= 0.05;
                adjustments.push("-5% margin: strong demand".to_string());
            } else if d.value < 30.0 {
                margin += 0.05;
                adjustments.push("+5% margin: weak demand".to_string());
            }
        }
        margin.clamp(self.config.min_margin, self.config.max_margin)
    }

    /// Price one product, or reject with a reason.
    pub fn calculate(
        &self,
        input: &ProductAnalysisInput,
        scores: &DimensionalScores,
        base_margin: f64,
    ) -> Valuation {
        let pricing = &input.pricing;
        let market_price = pricing
            .historical_market_price()
            .or_else(|| pricing.current_market_price())
            .filter(|p| p.is_positive());

        let (anchor, anchor_source) = match (pricing.retail_price, market_price) {
            (Some(retail), _) => (retail, AnchorSource::RetailPrice),
            (None, Some(market)) => (market, AnchorSource::SecondaryMarket),
            (None, None) => {
                return Valuation::rejected(
                    "No retail or secondary-market price available to anchor valuation",
                )
            }
        };

        if pricing.transaction_count == Some(0) {
            match anchor_source {
                AnchorSource::SecondaryMarket => {
                    return Valuation::rejected(
                        "Zero verified sales; secondary-market asking price is unverified",
                    )
                }
                AnchorSource::RetailPrice => {
                    if let Some(asking) = pricing.current_market_price() {
                        let ratio = asking.ratio_to(anchor).unwrap_or(0.0);
                        if ratio > self.config.unverified_premium_limit {
                            return Valuation::rejected(format!(
                                "Zero verified sales while sellers ask {:.0}% above retail ({} vs {})",
                                (ratio - 1.0) * 100.0,
                                asking,
                                anchor
                            ));
                        }
                    }
                }
            }
        }

        let current_year = input.as_of.year();
        let (status, years_retired) = retirement_status(
            &input.availability,
            current_year,
            self.config.retirement_age_years,
        );
        let retirement_multiplier = self.retirement_multiplier(status, years_retired);
        let demand_multiplier = self.demand_multiplier(scores.demand.as_ref().map(|s| s.value));
        let scarcity_multiplier = scores
            .availability
            .as_ref()
            .and_then(|s| s.multiplier())
            .unwrap_or(1.0);
        let liquidity_multiplier = Self::liquidity_multiplier(pricing.transaction_count);
        let volatility_multiplier = Self::volatility_multiplier(pricing.price_volatility);
        let theme_multiplier = self.theme_multiplier(&input.quality);
        let parts_value_multiplier =
            self.parts_value_multiplier(pricing.retail_price, input.quality.parts_count);

        let mut adjustments = Vec::new();
        if pricing.transaction_count.is_none() {
            adjustments.push("No transaction statistics: liquidity unverified".to_string());
        } else if liquidity_multiplier < 1.0 {
            adjustments.push(format!("Thin liquidity ×{liquidity_multiplier:.2}"));
        }
        if volatility_multiplier < 1.0 {
            adjustments.push(format!("Price volatility ×{volatility_multiplier:.2}"));
        }
        if theme_multiplier > 1.0 {
            adjustments.push(format!("Premium theme ×{theme_multiplier:.2}"));
        }
        if parts_value_multiplier != 1.0 {
            adjustments.push(format!("Parts per dollar ×{parts_value_multiplier:.2}"));
        }

        let intrinsic = anchor.as_f64()
            * retirement_multiplier
            * demand_multiplier
            * scarcity_multiplier
            * liquidity_multiplier
            * volatility_multiplier
            * theme_multiplier
            * parts_value_multiplier;
        let Some(intrinsic_value) = Cents::from_f64(intrinsic).filter(|v| v.is_positive()) else {
            return Valuation::rejected(format!("Degenerate valuation from anchor {anchor}"));
        };

        let margin = self.margin_of_safety(base_margin, scores, &mut adjustments);
        let Some(price) = Cents::from_f64(intrinsic * (1.0 - margin)).filter(|p| p.is_positive())
        else {
            return Valuation::rejected(format!(
                "Degenerate buy price from intrinsic value {intrinsic_value}"
            ));
        };
        if let Some(listed) = pricing.listing_price {
            adjustments.push(listing_note(listed, price));
        }

        let confidence =
            self.price_confidence(scores, anchor_source, pricing.transaction_count.is_some());
        let source_label = match anchor_source {
            AnchorSource::RetailPrice => "retail",
            AnchorSource::SecondaryMarket => "market",
        };
        let reasoning = format!(
            "Intrinsic value {intrinsic_value} = {source_label} {anchor} × retirement {retirement_multiplier:.2} ({status}) × demand {demand_multiplier:.2} × scarcity {scarcity_multiplier:.2} × liquidity {liquidity_multiplier:.2} × volatility {volatility_multiplier:.2} × theme {theme_multiplier:.2} × parts {parts_value_multiplier:.2}; {:.0}% margin of safety → buy at or below {price}",
            margin * 100.0
        );

        Valuation::Priced(RecommendedBuyPrice {
            price,
            reasoning,
            confidence,
            breakdown: Some(ValueBreakdown {
                anchor,
                anchor_source,
                retirement_status: status,
                retirement_multiplier,
                demand_multiplier,
                scarcity_multiplier,
                liquidity_multiplier,
                volatility_multiplier,
                theme_multiplier,
                parts_value_multiplier,
                intrinsic_value,
                margin_of_safety: margin,
                adjustments,
            }),
        })
    }

    fn price_confidence(
        &self,
        scores: &DimensionalScores,
        anchor: AnchorSource,
        has_transactions: bool,
    ) -> f64 {
        let confidences: Vec<f64> = scores.present().map(|(_, s)| s.confidence).collect();
        let base = if confidences.is_empty() {
            0.3
        } else {
            confidences.iter().sum::<f64>() / confidences.len() as f64
        };
        let anchor_factor = match anchor {
            AnchorSource::RetailPrice => 1.0,
            AnchorSource::SecondaryMarket => 0.8,
        };
        let liquidity_factor = if has_transactions { 1.0 } else { 0.8 };
        (base * anchor_factor * liquidity_factor).clamp(0.0, 1.0)
    }
}

/// Where the platform's current listing sits relative to the buy price.
fn listing_note(listed: Cents, buy_price: Cents) -> String {
    if listed <= buy_price {
        format!("Listed at {listed}, at or below target buy price")
    } else {
        let above = listed.ratio_to(buy_price).map_or(0.0, |r| (r - 1.0) * 100.0);
        format!("Listed at {listed}, {above:.0}% above target buy price")
    }
}
