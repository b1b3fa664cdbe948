//! Demand analyzer.
//!
//! Trusts what buyers actually pay over what sellers ask: secondary-market
//! transaction velocity and momentum dominate, listing prices are a much
//! smaller signal, community chatter and retail sales counts are minor.

use serde_json::json;

use crate::application::analyzers::scoring::{mean_of, Curve, ScoreAssembler};
use crate::domain::analysis::input::{CommunitySignals, DemandData, ProductAnalysisInput};
use crate::domain::analysis::score::AnalysisScore;
use crate::domain::entities::sales_statistics::ConditionStatistics;
use crate::domain::ports::analyzer::Analyzer;
use crate::domain::values::dimension::Dimension;
use crate::domain::values::trend::TrendDirection;

pub const WEIGHT_VELOCITY: f64 = 0.40;
pub const WEIGHT_MOMENTUM: f64 = 0.25;
pub const WEIGHT_LISTING: f64 = 0.15;
pub const WEIGHT_COMMUNITY: f64 = 0.12;
pub const WEIGHT_RETAIL_SALES: f64 = 0.08;

/// Window the six-month price guide covers, for the legacy velocity estimate.
const LEGACY_WINDOW_DAYS: f64 = 180.0;

/// Sales per day.
const VELOCITY_CURVE: Curve = Curve::new(&[
    (0.0, 0.0),
    (0.05, 15.0),
    (0.1, 25.0),
    (0.25, 40.0),
    (0.5, 55.0),
    (1.0, 70.0),
    (2.0, 85.0),
    (4.0, 100.0),
]);

/// Sales in the last 30 days.
const RECENT_CURVE: Curve = Curve::new(&[
    (0.0, 0.0),
    (2.0, 30.0),
    (5.0, 50.0),
    (10.0, 70.0),
    (20.0, 90.0),
    (30.0, 100.0),
]);

/// Current asking price / six-month average.
const PRICE_TREND_CURVE: Curve = Curve::new(&[
    (0.6, 10.0),
    (0.8, 30.0),
    (1.0, 50.0),
    (1.2, 70.0),
    (1.5, 90.0),
    (2.0, 100.0),
]);

/// Secondary-market price / original retail price.
const PREMIUM_CURVE: Curve = Curve::new(&[
    (0.5, 10.0),
    (0.8, 30.0),
    (1.0, 45.0),
    (1.3, 65.0),
    (1.6, 80.0),
    (2.0, 95.0),
    (3.0, 100.0),
]);

/// Number of competing lots for sale (fewer is better).
const LOTS_CURVE: Curve = Curve::new(&[
    (0.0, 95.0),
    (5.0, 80.0),
    (20.0, 55.0),
    (50.0, 30.0),
    (100.0, 10.0),
]);

const POSTS_CURVE: Curve = Curve::new(&[
    (0.0, 0.0),
    (3.0, 30.0),
    (10.0, 55.0),
    (25.0, 75.0),
    (50.0, 90.0),
    (100.0, 100.0),
]);

const POST_SCORE_CURVE: Curve = Curve::new(&[
    (0.0, 0.0),
    (5.0, 30.0),
    (20.0, 60.0),
    (50.0, 85.0),
    (100.0, 100.0),
]);

const UNITS_SOLD_CURVE: Curve = Curve::new(&[
    (0.0, 0.0),
    (10.0, 20.0),
    (50.0, 40.0),
    (200.0, 60.0),
    (1000.0, 80.0),
    (5000.0, 100.0),
]);

const FORMULA: &str =
    "0.40×velocity + 0.25×momentum + 0.15×listing_price + 0.12×community + 0.08×retail_sales";

pub fn trend_score(trend: TrendDirection) -> f64 {
    match trend {
        TrendDirection::Increasing => 80.0,
        TrendDirection::Stable => 55.0,
        TrendDirection::Decreasing => 25.0,
    }
}

pub fn volume_trend_score(trend: TrendDirection) -> f64 {
    match trend {
        TrendDirection::Increasing => 85.0,
        TrendDirection::Stable => 55.0,
        TrendDirection::Decreasing => 25.0,
    }
}

/// RSI bands: 50–70 is the healthiest, above 80 is overheated, below 20 is
/// deeply oversold.
pub fn rsi_score(rsi: f64) -> (f64, &'static str) {
    if rsi > 80.0 {
        (35.0, "overbought, overheated risk")
    } else if rsi > 70.0 {
        (70.0, "strong but stretched")
    } else if rsi >= 50.0 {
        (90.0, "healthy momentum")
    } else if rsi >= 30.0 {
        (60.0, "neutral to soft")
    } else if rsi >= 20.0 {
        (45.0, "weak")
    } else {
        (30.0, "deeply oversold")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DemandAnalyzer;

impl DemandAnalyzer {
    pub fn score(&self, data: &DemandData) -> Option<AnalysisScore> {
        let mut a = ScoreAssembler::new();

        let has_transactions = a.slot("transaction_statistics", data.transactions.is_some());
        let tx = data.transactions.as_ref();
        a.slot("price_trend", tx.is_some_and(|t| t.price_trend.is_some()));
        a.slot("rsi", tx.is_some_and(|t| t.rsi.is_some()));
        a.slot("volume_trend", tx.is_some_and(|t| t.volume_trend.is_some()));
        a.slot(
            "market_prices",
            data.current_market_price.is_some() || data.historical_market_price.is_some(),
        );
        a.slot("current_lots", data.current_lots.is_some());
        a.slot("community_sentiment", data.community.is_some());
        a.slot("retail_units_sold", data.units_sold.is_some());

        match tx {
            Some(t) => {
                score_velocity(&mut a, t);
                score_momentum(&mut a, t);
            }
            // Legacy price-guide activity stands in only when no transaction
            // statistics exist at all.
            None => {
                if let Some(times_sold) = data.legacy_times_sold {
                    score_legacy_velocity(&mut a, times_sold);
                }
            }
        }
        score_listing(&mut a, data);
        if let Some(community) = &data.community {
            score_community(&mut a, community);
        }
        if let Some(units) = data.units_sold {
            let s = UNITS_SOLD_CURVE.eval(units as f64);
            a.component(
                "retail_sales",
                WEIGHT_RETAIL_SALES,
                s,
                json!(units),
                format!("units_sold {units} → {s:.1}"),
                format!("{units} units sold at retail"),
            );
        }

        a.data_point("uses_transaction_statistics", has_transactions);
        a.finish(FORMULA)
    }
}

fn score_velocity(a: &mut ScoreAssembler, t: &ConditionStatistics) {
    let per_day = t
        .sales_velocity
        .or_else(|| t.recent_90d.map(|n| n as f64 / 90.0))
        .or_else(|| t.recent_30d.map(|n| n as f64 / 30.0))
        .unwrap_or(t.total_transactions as f64 / LEGACY_WINDOW_DAYS);
    let velocity = VELOCITY_CURVE.eval(per_day);

    let (score, calculation) = match t.recent_30d {
        Some(recent) => {
            let r = RECENT_CURVE.eval(recent as f64);
            (
                0.7 * velocity + 0.3 * r,
                format!(
                    "0.7×velocity({per_day:.2}/day → {velocity:.1}) + 0.3×recent30({recent} → {r:.1})"
                ),
            )
        }
        None => (velocity, format!("velocity {per_day:.2}/day → {velocity:.1}")),
    };

    let reasoning = if t.total_transactions == 0 {
        "No verified sales".to_string()
    } else {
        match t.recent_30d {
            Some(recent) => format!("{per_day:.2} sales/day ({recent} in last 30 days)"),
            None => format!("{per_day:.2} sales/day"),
        }
    };
    a.reason(reasoning.clone());

    if let (Some(r30), Some(r90)) = (t.recent_30d, t.recent_90d) {
        if r90 > 0 && (r30 as f64 * 3.0) > r90 as f64 * 1.2 {
            a.reason("Sales accelerating (30-day pace above 90-day average)");
        } else if r90 > 0 && (r30 as f64 * 3.0) < r90 as f64 * 0.8 {
            a.reason("Sales slowing (30-day pace below 90-day average)");
        }
    }

    a.data_point("sales_per_day", per_day);
    a.data_point("total_transactions", t.total_transactions);
    a.component(
        "velocity",
        WEIGHT_VELOCITY,
        score,
        json!(per_day),
        calculation,
        reasoning,
    );
}

fn score_legacy_velocity(a: &mut ScoreAssembler, times_sold: u32) {
    let per_day = times_sold as f64 / LEGACY_WINDOW_DAYS;
    let score = VELOCITY_CURVE.eval(per_day);
    let reasoning = format!("{times_sold} sold in six months (price guide only)");
    a.reason(reasoning.clone());
    a.data_point("sales_per_day", per_day);
    a.component(
        "velocity",
        WEIGHT_VELOCITY,
        score,
        json!(times_sold),
        format!("legacy times_sold {times_sold} / 180 days = {per_day:.2}/day → {score:.1}"),
        reasoning,
    );
}

fn score_momentum(a: &mut ScoreAssembler, t: &ConditionStatistics) {
    let trend = t.price_trend.map(trend_score);
    let rsi = t.rsi.map(rsi_score);
    let volume = t.volume_trend.map(volume_trend_score);
    let Some(score) = mean_of(&[trend, rsi.map(|(s, _)| s), volume]) else {
        return;
    };

    let mut parts = Vec::new();
    if let Some(direction) = t.price_trend {
        match t.price_change_pct {
            Some(pct) => parts.push(format!("price {direction} ({pct:+.1}%)")),
            None => parts.push(format!("price {direction}")),
        }
    }
    if let (Some(value), Some((_, label))) = (t.rsi, rsi) {
        parts.push(format!("RSI {value:.0} ({label})"));
        a.data_point("rsi", value);
    }
    if let Some(direction) = t.volume_trend {
        parts.push(format!("volume {direction}"));
    }
    let reasoning = format!("Momentum: {}", parts.join(", "));
    a.reason(reasoning.clone());
    a.component(
        "momentum",
        WEIGHT_MOMENTUM,
        score,
        json!({
            "price_trend": t.price_trend,
            "rsi": t.rsi,
            "volume_trend": t.volume_trend,
        }),
        format!("mean(trend, rsi, volume) over present = {score:.1}"),
        reasoning,
    );
}

fn score_listing(a: &mut ScoreAssembler, data: &DemandData) {
    let trend_ratio = match (data.current_market_price, data.historical_market_price) {
        (Some(current), Some(historical)) => current.ratio_to(historical),
        _ => None,
    };
    let premium = data
        .current_market_price
        .or(data.historical_market_price)
        .zip(data.retail_price)
        .and_then(|(market, retail)| market.ratio_to(retail));

    let trend = trend_ratio.map(|r| PRICE_TREND_CURVE.eval(r));
    let premium_score = premium.map(|r| PREMIUM_CURVE.eval(r));
    let lots = data.current_lots.map(|n| LOTS_CURVE.eval(n as f64));
    let Some(score) = mean_of(&[trend, premium_score, lots]) else {
        return;
    };

    let mut parts = Vec::new();
    if let Some(r) = trend_ratio {
        parts.push(format!("asking {:+.0}% vs six-month average", (r - 1.0) * 100.0));
        a.data_point("price_trend_ratio", r);
    }
    if let Some(r) = premium {
        parts.push(format!("{:.2}× retail", r));
        a.data_point("retail_premium", r);
    }
    if let Some(n) = data.current_lots {
        parts.push(format!("{n} lots listed"));
    }
    let reasoning = format!("Listings: {}", parts.join(", "));
    a.reason(reasoning.clone());
    a.component(
        "listing_price",
        WEIGHT_LISTING,
        score,
        json!({
            "current": data.current_market_price,
            "historical": data.historical_market_price,
            "lots": data.current_lots,
        }),
        format!("mean(price_trend, retail_premium, lot_scarcity) over present = {score:.1}"),
        reasoning,
    );
}

fn score_community(a: &mut ScoreAssembler, c: &CommunitySignals) {
    let posts = POSTS_CURVE.eval(c.post_count as f64);
    let avg = c.average_score.map(|s| POST_SCORE_CURVE.eval(s));
    let score = mean_of(&[Some(posts), avg]).unwrap_or(posts);
    let reasoning = format!(
        "{} community posts, {} comments",
        c.post_count, c.total_comments
    );
    a.component(
        "community",
        WEIGHT_COMMUNITY,
        score,
        json!({ "posts": c.post_count, "average_score": c.average_score }),
        format!("mean(posts {} → {posts:.1}, avg score) = {score:.1}", c.post_count),
        reasoning,
    );
}

impl Analyzer for DemandAnalyzer {
    fn name(&self) -> &'static str {
        "demand"
    }

    fn description(&self) -> &'static str {
        "Secondary-market transaction velocity and momentum, with listing prices, community sentiment and retail sales as minor signals"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Demand
    }

    fn analyze(&self, input: &ProductAnalysisInput) -> Option<AnalysisScore> {
        self.score(&input.demand)
    }
}
