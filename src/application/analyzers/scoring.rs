//! Shared math for the dimension analyzers: piecewise-linear curves and a
//! score assembler that tracks input slots, sub-scores and reasoning.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::analysis::score::{AnalysisScore, ScoreBreakdown, ScoreComponent};

/// Monotonic piecewise-linear map from a domain quantity to 0–100.
///
/// Points must be sorted by `x`. Inputs outside the range clamp to the end
/// points.
#[derive(Debug, Clone, Copy)]
pub struct Curve {
    points: &'static [(f64, f64)],
}

impl Curve {
    pub const fn new(points: &'static [(f64, f64)]) -> Self {
        Self { points }
    }

    pub fn eval(&self, x: f64) -> f64 {
        if x.is_nan() || self.points.is_empty() {
            return f64::NAN;
        }
        let (first_x, first_y) = self.points[0];
        if x <= first_x {
            return first_y;
        }
        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                let t = (x - x0) / (x1 - x0);
                return y0 + t * (y1 - y0);
            }
        }
        self.points[self.points.len() - 1].1
    }
}

/// Mean of the present values, or `None` if there are none.
pub fn mean_of(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

/// Collects sub-scores for one dimension and turns them into an [`AnalysisScore`].
///
/// The total is the plain weighted sum of the sub-scores that were produced.
/// Omitted sub-scores are not compensated for by scaling up the others.
/// Confidence is the fraction of declared input slots that were present.
#[derive(Debug, Default)]
pub struct ScoreAssembler {
    components: Vec<ScoreComponent>,
    slots: usize,
    present_slots: usize,
    missing: Vec<String>,
    reasons: Vec<String>,
    data_points: BTreeMap<String, Value>,
}

impl ScoreAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an input slot. Returns `present` for chaining into `if`.
    pub fn slot(&mut self, name: &str, present: bool) -> bool {
        self.slots += 1;
        if present {
            self.present_slots += 1;
        } else {
            self.missing.push(name.to_string());
        }
        present
    }

    pub fn component(
        &mut self,
        name: &str,
        weight: f64,
        score: f64,
        raw_value: Value,
        calculation: String,
        reasoning: String,
    ) {
        self.components.push(ScoreComponent {
            name: name.to_string(),
            weight,
            score: score.clamp(0.0, 100.0),
            raw_value,
            calculation,
            reasoning,
        });
    }

    pub fn reason(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    pub fn data_point(&mut self, key: &str, value: impl Into<Value>) {
        self.data_points.insert(key.to_string(), value.into());
    }

    pub fn has_components(&self) -> bool {
        !self.components.is_empty()
    }

    pub fn confidence(&self) -> f64 {
        if self.slots == 0 {
            return 0.0;
        }
        self.present_slots as f64 / self.slots as f64
    }

    /// `None` when no sub-score was produced.
    pub fn finish(self, formula: &str) -> Option<AnalysisScore> {
        if self.components.is_empty() {
            return None;
        }
        let confidence = self.confidence();
        let total: f64 = self.components.iter().map(|c| c.weight * c.score).sum();
        let reasoning = if self.reasons.is_empty() {
            self.components
                .iter()
                .map(|c| c.reasoning.clone())
                .collect::<Vec<_>>()
                .join("; ")
        } else {
            self.reasons.join("; ")
        };
        let breakdown = ScoreBreakdown {
            components: self.components,
            formula: formula.to_string(),
            total: total.round(),
            missing_data: self.missing,
            ..Default::default()
        };
        Some(
            AnalysisScore::new(total, confidence, reasoning)
                .with_data_points(self.data_points)
                .with_breakdown(breakdown),
        )
    }
}
