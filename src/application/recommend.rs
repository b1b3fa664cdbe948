//! Recommendation use case: aggregate, score every dimension, interpret the
//! scores under a strategy, then price.

use std::collections::BTreeMap;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::aggregation::DataAggregator;
use crate::application::strategies::StrategyRegistry;
use crate::application::valuation::ValueCalculator;
use crate::domain::analysis::input::ProductAnalysisInput;
use crate::domain::analysis::recommendation::{BatchAnalysis, BatchFailure, ProductRecommendation};
use crate::domain::analysis::score::DimensionalScores;
use crate::domain::error::DomainError;
use crate::domain::ports::analyzer::Analyzer;
use crate::domain::ports::strategy::Strategy;

/// Name and description of a registered component, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentInfo {
    pub name: String,
    pub description: String,
}

pub struct RecommendationEngine {
    aggregator: DataAggregator,
    analyzers: Vec<Box<dyn Analyzer>>,
    value_calculator: ValueCalculator,
    strategies: StrategyRegistry,
    default_strategy: String,
}

impl RecommendationEngine {
    pub fn new(
        aggregator: DataAggregator,
        analyzers: Vec<Box<dyn Analyzer>>,
        value_calculator: ValueCalculator,
        strategies: StrategyRegistry,
        default_strategy: impl Into<String>,
    ) -> Self {
        Self {
            aggregator,
            analyzers,
            value_calculator,
            strategies,
            default_strategy: default_strategy.into(),
        }
    }

    pub fn aggregator(&self) -> &DataAggregator {
        &self.aggregator
    }

    fn resolve_strategy(&self, name: Option<&str>) -> Result<&dyn Strategy, DomainError> {
        self.strategies
            .get(name.unwrap_or(self.default_strategy.as_str()))
    }

    /// Recommendation for one product. `strategy` falls back to the
    /// configured default.
    pub async fn analyze_product(
        &self,
        product_id: &str,
        strategy: Option<&str>,
    ) -> Result<ProductRecommendation, DomainError> {
        let strategy = self.resolve_strategy(strategy)?;
        let input = self.aggregator.aggregate_product_data(product_id).await?;
        self.score_product(&input, strategy).await
    }

    /// Recommendations for many products with one fetch per data source.
    ///
    /// Unknown products and incomplete price guides fail the whole batch.
    /// Per-product scoring errors are collected in `failures` instead.
    pub async fn analyze_products(
        &self,
        product_ids: &[String],
        strategy: Option<&str>,
    ) -> Result<BatchAnalysis, DomainError> {
        let strategy = self.resolve_strategy(strategy)?;
        let products = self.aggregator.fetch_products(product_ids).await?;
        let inputs = self.aggregator.aggregate_products_data(&products).await?;

        let mut ordered: Vec<&ProductAnalysisInput> = inputs.values().collect();
        ordered.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        let results = join_all(ordered.iter().map(|input| async move {
            let result = self.score_product(input, strategy).await;
            (input.product_id.clone(), result)
        }))
        .await;

        let mut batch = BatchAnalysis::default();
        for (product_id, result) in results {
            match result {
                Ok(rec) => {
                    batch.recommendations.insert(product_id, rec);
                }
                Err(e) => {
                    warn!(product_id = %product_id, error = %e, "product skipped in batch");
                    batch.failures.push(BatchFailure {
                        product_id,
                        error: e.to_string(),
                    });
                }
            }
        }
        info!(
            strategy = strategy.name(),
            requested = product_ids.len(),
            scored = batch.recommendations.len(),
            failed = batch.failures.len(),
            "batch analysis complete"
        );
        Ok(batch)
    }

    /// Score an already-aggregated input.
    ///
    /// Analyzers are independent and joined before interpretation. They are
    /// pure and never await, so the join polls them in turn on the calling
    /// task; no ordering between them is relied upon.
    pub async fn score_product(
        &self,
        input: &ProductAnalysisInput,
        strategy: &dyn Strategy,
    ) -> Result<ProductRecommendation, DomainError> {
        validate_input(input)?;

        let scored = join_all(
            self.analyzers
                .iter()
                .map(|a| async move { (a.dimension(), a.name(), a.analyze(input)) }),
        )
        .await;

        let mut dimensions = DimensionalScores::default();
        for (dimension, name, score) in scored {
            match &score {
                Some(s) if !s.is_finite() => {
                    return Err(DomainError::InvalidInput(format!(
                        "{name} analyzer produced a non-finite score for {}",
                        input.product_id
                    )));
                }
                Some(s) => debug!(
                    product_id = %input.product_id,
                    analyzer = name,
                    score = s.value,
                    confidence = s.confidence,
                    "dimension scored"
                ),
                None => {
                    debug!(product_id = %input.product_id, analyzer = name, "no qualifying data")
                }
            }
            dimensions.set(dimension, score);
        }

        let mut interpretation = strategy.interpret(&dimensions);
        let valuation = self
            .value_calculator
            .calculate(input, &dimensions, strategy.margin_of_safety());

        if let Some(reason) = valuation.rejection_reason() {
            interpretation.risks.push(reason.to_string());
            interpretation.overall.reasoning = format!(
                "{}; Buy price withheld: {reason}",
                interpretation.overall.reasoning
            );
        }

        info!(
            product_id = %input.product_id,
            strategy = strategy.name(),
            overall = interpretation.overall.value,
            action = %interpretation.action,
            "recommendation ready"
        );

        Ok(ProductRecommendation {
            product_id: input.product_id.clone(),
            overall: interpretation.overall,
            dimensions,
            action: interpretation.action,
            strategy: strategy.name().to_string(),
            urgency: interpretation.urgency,
            estimated_roi: interpretation.estimated_roi,
            time_horizon: interpretation.time_horizon,
            risks: interpretation.risks,
            opportunities: interpretation.opportunities,
            recommended_buy_price: valuation.price().cloned(),
            analyzed_at: Utc::now(),
        })
    }

    pub fn available_strategies(&self) -> Vec<ComponentInfo> {
        self.strategies
            .list()
            .map(|s| ComponentInfo {
                name: s.name().to_string(),
                description: s.description().to_string(),
            })
            .collect()
    }

    pub fn analyzer_info(&self) -> Vec<ComponentInfo> {
        self.analyzers
            .iter()
            .map(|a| ComponentInfo {
                name: a.name().to_string(),
                description: a.description().to_string(),
            })
            .collect()
    }

    /// Strategy weights keyed by strategy name, for the `strategies` listing.
    pub fn strategy_weights(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.strategies
            .list()
            .map(|s| {
                let weights = s.weights().iter().map(|(d, w)| (d.to_string(), w)).collect();
                (s.name().to_string(), weights)
            })
            .collect()
    }
}

/// Reject inputs no analyzer can reason about: non-finite numbers and
/// ratings outside the 0–5 scale.
pub fn validate_input(input: &ProductAnalysisInput) -> Result<(), DomainError> {
    let id = &input.product_id;
    if let Some(rating) = input.quality.rating {
        if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
            return Err(DomainError::InvalidInput(format!(
                "product {id}: rating {rating} is outside 0-5"
            )));
        }
    }
    let mut numbers = vec![("price_volatility", input.pricing.price_volatility)];
    if let Some(t) = &input.demand.transactions {
        numbers.extend([
            ("sales_velocity", t.sales_velocity),
            ("volatility", t.volatility),
            ("price_change_pct", t.price_change_pct),
            ("rsi", t.rsi),
        ]);
    }
    if let Some(c) = &input.demand.community {
        numbers.push(("average_score", c.average_score));
    }
    for (field, value) in numbers {
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(DomainError::InvalidInput(format!(
                    "product {id}: {field} is not a finite number"
                )));
            }
        }
    }
    Ok(())
}
