//! Score value objects shared by analyzers, strategies and the engine.

use crate::domain::values::dimension::Dimension;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One dimension's verdict on a product.
///
/// `value` is kept in 0–100 and `confidence` in 0–1 by [`AnalysisScore::new`].
/// An analyzer with nothing to go on returns no score at all rather than a
/// neutral placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScore {
    pub value: f64,
    pub confidence: f64,
    pub reasoning: String,
    #[serde(default)]
    pub data_points: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl AnalysisScore {
    pub fn new(value: f64, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            value: value.clamp(0.0, 100.0),
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            data_points: BTreeMap::new(),
            breakdown: None,
        }
    }

    pub fn with_data_points(mut self, data_points: BTreeMap<String, serde_json::Value>) -> Self {
        self.data_points = data_points;
        self
    }

    pub fn with_breakdown(mut self, breakdown: ScoreBreakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    /// Look up a numeric data point.
    pub fn data_point_f64(&self, key: &str) -> Option<f64> {
        self.data_points.get(key).and_then(|v| v.as_f64())
    }

    /// The multiplier this dimension hands to the price model, if any.
    pub fn multiplier(&self) -> Option<f64> {
        self.breakdown.as_ref().and_then(|b| b.multiplier)
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.confidence.is_finite()
    }
}

/// One named sub-score inside a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    pub weight: f64,
    pub score: f64,
    #[serde(default)]
    pub raw_value: serde_json::Value,
    pub calculation: String,
    pub reasoning: String,
}

/// How a dimension's total was assembled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub formula: String,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier_formula: Option<String>,
    #[serde(default)]
    pub missing_data: Vec<String>,
}

/// Per-dimension scores for one product. `None` means "no opinion".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionalScores {
    pub demand: Option<AnalysisScore>,
    pub availability: Option<AnalysisScore>,
    pub quality: Option<AnalysisScore>,
}

impl DimensionalScores {
    pub fn get(&self, dimension: Dimension) -> Option<&AnalysisScore> {
        match dimension {
            Dimension::Demand => self.demand.as_ref(),
            Dimension::Availability => self.availability.as_ref(),
            Dimension::Quality => self.quality.as_ref(),
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: Option<AnalysisScore>) {
        match dimension {
            Dimension::Demand => self.demand = score,
            Dimension::Availability => self.availability = score,
            Dimension::Quality => self.quality = score,
        }
    }

    /// Dimensions that produced a score, in canonical order.
    pub fn present(&self) -> impl Iterator<Item = (Dimension, &AnalysisScore)> {
        Dimension::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|s| (d, s)))
    }

    pub fn missing(&self) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| self.get(*d).is_none())
            .collect()
    }
}

/// Strategy weight per dimension, each in 0–1.
///
/// A dimension absent from the map does not take part in the strategy at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights(BTreeMap<Dimension, f64>);

impl DimensionWeights {
    pub fn new(weights: &[(Dimension, f64)]) -> Self {
        Self(
            weights
                .iter()
                .map(|(d, w)| (*d, w.clamp(0.0, 1.0)))
                .collect(),
        )
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0.iter().map(|(d, w)| (*d, *w))
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}
