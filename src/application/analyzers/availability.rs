//! Availability analyzer: retirement urgency, retail stock scarcity and
//! listing status. Higher scores mean harder to get.
//!
//! Also derives the scarcity multiplier the value calculator consumes.

use chrono::Datelike;
use serde_json::json;

use crate::application::analyzers::scoring::{Curve, ScoreAssembler};
use crate::domain::analysis::input::{AvailabilityData, ProductAnalysisInput};
use crate::domain::analysis::score::AnalysisScore;
use crate::domain::ports::analyzer::Analyzer;
use crate::domain::values::dimension::Dimension;
use crate::domain::values::listing_status::ListingStatus;

pub const WEIGHT_RETIREMENT: f64 = 0.55;
pub const WEIGHT_STOCK: f64 = 0.35;
pub const WEIGHT_LISTING_STATUS: f64 = 0.10;

pub const SCARCITY_MULTIPLIER_RANGE: (f64, f64) = (0.95, 1.10);

/// Days until retirement → urgency. Non-increasing.
pub const URGENCY_CURVE: Curve = Curve::new(&[
    (0.0, 100.0),
    (30.0, 95.0),
    (90.0, 80.0),
    (180.0, 60.0),
    (365.0, 30.0),
    (730.0, 10.0),
]);

/// Units in stock → scarcity. Zero units is the maximum.
pub const STOCK_CURVE: Curve = Curve::new(&[
    (0.0, 100.0),
    (1.0, 95.0),
    (5.0, 80.0),
    (20.0, 55.0),
    (100.0, 25.0),
    (500.0, 5.0),
]);

const RETIRED_SCORE: f64 = 90.0;
const FLAGGED_WITHOUT_DATE_SCORE: f64 = 80.0;
const NO_RETIREMENT_SCORE: f64 = 15.0;

const FORMULA: &str = "0.55×retirement_urgency + 0.35×stock_scarcity + 0.10×listing_status";

/// `0.95 + (100 - score) / 100 × 0.15`. A higher availability score (scarcer)
/// yields the smaller multiplier: 0.95 at 100, 1.10 at 0.
pub fn scarcity_multiplier(score: f64) -> f64 {
    let m = 0.95 + (100.0 - score.clamp(0.0, 100.0)) / 100.0 * 0.15;
    m.clamp(SCARCITY_MULTIPLIER_RANGE.0, SCARCITY_MULTIPLIER_RANGE.1)
}

pub fn listing_status_score(status: ListingStatus) -> f64 {
    match status {
        ListingStatus::Delisted => 95.0,
        ListingStatus::SoldOut => 80.0,
        ListingStatus::Active => 30.0,
    }
}

/// Score for days-until-retirement plus the reason it triggered. A passed
/// date scores like an authoritative retirement year.
pub fn retirement_urgency(days: i64) -> (f64, String) {
    let score = if days < 0 {
        RETIRED_SCORE
    } else {
        URGENCY_CURVE.eval(days as f64)
    };
    let reason = if days < 0 {
        format!("Expected retirement date passed {} days ago", -days)
    } else if days < 30 {
        format!("Retiring in {days} days (CRITICAL WINDOW)")
    } else if days < 90 {
        format!("Retiring in {days} days (act soon)")
    } else if days <= 365 {
        format!("Retiring in {days} days")
    } else {
        format!("Retirement over a year away ({days} days)")
    };
    (score, reason)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AvailabilityAnalyzer;

impl AvailabilityAnalyzer {
    pub fn score(&self, data: &AvailabilityData, current_year: i32) -> Option<AnalysisScore> {
        let mut a = ScoreAssembler::new();

        let retired_year = data.year_retired.filter(|y| *y <= current_year);
        let scheduled_year = data.year_retired.filter(|y| *y > current_year);
        let has_timing = data.year_retired.is_some()
            || data.days_until_retirement.is_some()
            || data.retiring_soon.is_some();
        a.slot("retirement_timing", has_timing);
        a.slot("stock", data.stock.is_some());
        a.slot("listing_status", data.listing_status.is_some());

        let phase = if let Some(year) = retired_year {
            let reason = format!("Retired in {year} (supply fixed)");
            a.reason(reason.clone());
            a.component(
                "retirement_urgency",
                WEIGHT_RETIREMENT,
                RETIRED_SCORE,
                json!(year),
                format!("retired {year} → {RETIRED_SCORE}"),
                reason,
            );
            "retired"
        } else if let Some(year) = scheduled_year {
            // The catalog year outranks the heuristic flag. A matching
            // upcoming date refines the urgency; a contradicting one is ignored.
            let (score, reason, raw) = match data.days_until_retirement.filter(|d| *d >= 0) {
                Some(days) => {
                    a.data_point("days_until_retirement", days);
                    let (score, reason) = retirement_urgency(days);
                    (score, reason, json!(days))
                }
                None => (
                    FLAGGED_WITHOUT_DATE_SCORE,
                    format!("Scheduled to retire in {year}"),
                    json!(year),
                ),
            };
            a.reason(reason.clone());
            a.component(
                "retirement_urgency",
                WEIGHT_RETIREMENT,
                score,
                raw,
                format!("retiring {year} → {score:.1}"),
                reason,
            );
            "pre_retirement"
        } else if let Some(days) = data.days_until_retirement {
            let (score, reason) = retirement_urgency(days);
            a.reason(reason.clone());
            a.data_point("days_until_retirement", days);
            a.component(
                "retirement_urgency",
                WEIGHT_RETIREMENT,
                score,
                json!(days),
                format!("days_until_retirement {days} → {score:.1}"),
                reason,
            );
            if days < 0 {
                "retired"
            } else {
                "pre_retirement"
            }
        } else if data.retiring_soon == Some(true) {
            let reason = "Flagged as retiring soon (no date)".to_string();
            a.reason(reason.clone());
            a.component(
                "retirement_urgency",
                WEIGHT_RETIREMENT,
                FLAGGED_WITHOUT_DATE_SCORE,
                json!(true),
                format!("retiring_soon flag → {FLAGGED_WITHOUT_DATE_SCORE}"),
                reason,
            );
            "pre_retirement"
        } else if data.retiring_soon == Some(false) {
            a.component(
                "retirement_urgency",
                WEIGHT_RETIREMENT,
                NO_RETIREMENT_SCORE,
                json!(false),
                format!("no retirement announced → {NO_RETIREMENT_SCORE}"),
                "No retirement announced".to_string(),
            );
            "active"
        } else {
            "unknown"
        };
        a.data_point("retirement_phase", phase);

        if let Some(stock) = data.stock {
            let score = STOCK_CURVE.eval(stock as f64);
            let reason = match stock {
                0 => "Out of stock at retail".to_string(),
                1..=5 => format!("Only {stock} units left"),
                _ => format!("{stock} units in stock"),
            };
            if stock <= 5 {
                a.reason(reason.clone());
            }
            a.data_point("stock", stock);
            a.component(
                "stock_scarcity",
                WEIGHT_STOCK,
                score,
                json!(stock),
                format!("stock {stock} → {score:.1}"),
                reason,
            );
        }

        if let Some(status) = data.listing_status {
            let score = listing_status_score(status);
            if status != ListingStatus::Active {
                a.reason(format!("Listing {status}"));
            }
            a.component(
                "listing_status",
                WEIGHT_LISTING_STATUS,
                score,
                json!(status),
                format!("{status} → {score}"),
                format!("Listing {status}"),
            );
        }

        let mut score = a.finish(FORMULA)?;
        let multiplier = scarcity_multiplier(score.value);
        score
            .data_points
            .insert("scarcity_multiplier".to_string(), json!(multiplier));
        if let Some(b) = score.breakdown.as_mut() {
            b.multiplier = Some(multiplier);
            b.multiplier_range = Some(SCARCITY_MULTIPLIER_RANGE);
            b.multiplier_formula = Some("0.95 + (100 - score) / 100 × 0.15".to_string());
        }
        Some(score)
    }
}

impl Analyzer for AvailabilityAnalyzer {
    fn name(&self) -> &'static str {
        "availability"
    }

    fn description(&self) -> &'static str {
        "Retirement urgency, retail stock scarcity and platform listing status"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Availability
    }

    fn analyze(&self, input: &ProductAnalysisInput) -> Option<AnalysisScore> {
        self.score(&input.availability, input.as_of.year())
    }
}
