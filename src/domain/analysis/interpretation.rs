//! Shared scoring core behind every strategy.
//!
//! The overall score is a weighted average over the dimensions that actually
//! produced a score. Weights of missing dimensions drop out of the
//! denominator, so a missing dimension never counts as a zero.

use crate::domain::analysis::score::{
    AnalysisScore, DimensionWeights, DimensionalScores, ScoreBreakdown, ScoreComponent,
};
use crate::domain::ports::strategy::{ActionThresholds, UrgencyThresholds};
use crate::domain::values::action::{Action, Urgency};
use crate::domain::values::dimension::Dimension;
use serde_json::json;
use std::collections::BTreeMap;

/// A strategy's reading of a set of dimensional scores, before pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub overall: AnalysisScore,
    pub action: Action,
    pub urgency: Urgency,
    pub estimated_roi: Option<f64>,
    pub time_horizon: Option<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

/// One present dimension's share of the overall score.
#[derive(Debug, Clone, Copy)]
pub struct Contribution<'a> {
    pub dimension: Dimension,
    /// Weight after renormalizing over present dimensions.
    pub weight: f64,
    pub score: &'a AnalysisScore,
}

/// Renormalized contributions of every scored, positively weighted dimension.
pub fn contributions<'a>(
    weights: &DimensionWeights,
    scores: &'a DimensionalScores,
) -> Vec<Contribution<'a>> {
    let present: Vec<(Dimension, f64, &AnalysisScore)> = scores
        .present()
        .filter_map(|(d, s)| weights.get(d).filter(|w| *w > 0.0).map(|w| (d, w, s)))
        .collect();
    let total: f64 = present.iter().map(|(_, w, _)| w).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    present
        .into_iter()
        .map(|(dimension, w, score)| Contribution {
            dimension,
            weight: w / total,
            score,
        })
        .collect()
}

/// Weighted overall `(value, confidence)`, or `None` when nothing contributed.
pub fn weighted_overall(
    weights: &DimensionWeights,
    scores: &DimensionalScores,
) -> Option<(f64, f64)> {
    let parts = contributions(weights, scores);
    if parts.is_empty() {
        return None;
    }
    let value = parts.iter().map(|c| c.weight * c.score.value).sum::<f64>();
    let confidence = parts.iter().map(|c| c.weight * c.score.confidence).sum::<f64>();
    Some((value.clamp(0.0, 100.0), confidence.clamp(0.0, 1.0)))
}

pub fn action_for(score: f64, thresholds: ActionThresholds) -> Action {
    if score >= thresholds.strong_buy {
        Action::StrongBuy
    } else if score >= thresholds.buy {
        Action::Buy
    } else if score >= thresholds.hold {
        Action::Hold
    } else {
        Action::Pass
    }
}

/// Urgency follows the availability score alone; no availability, no rush.
pub fn urgency_for(availability: Option<&AnalysisScore>, thresholds: UrgencyThresholds) -> Urgency {
    let Some(score) = availability else {
        return Urgency::NoRush;
    };
    if score.value >= thresholds.urgent {
        Urgency::Urgent
    } else if score.value >= thresholds.moderate {
        Urgency::Moderate
    } else if score.value >= thresholds.low {
        Urgency::Low
    } else {
        Urgency::NoRush
    }
}

/// Fixed per-dimension threshold rules. Returns `(risks, opportunities)`.
pub fn risks_and_opportunities(
    weights: &DimensionWeights,
    scores: &DimensionalScores,
) -> (Vec<String>, Vec<String>) {
    let mut risks = Vec::new();
    let mut opportunities = Vec::new();

    if let Some(demand) = &scores.demand {
        if demand.value < 30.0 {
            risks.push("Low market demand".to_string());
        } else if demand.value >= 70.0 {
            opportunities.push("Strong market demand".to_string());
        }
    }
    if let Some(availability) = &scores.availability {
        if availability.value >= 75.0 {
            opportunities.push("Scarcity value".to_string());
        } else if availability.value < 30.0 {
            risks.push("Readily available, no scarcity premium".to_string());
        }
    }
    if let Some(quality) = &scores.quality {
        if quality.value < 40.0 {
            risks.push("Quality concerns".to_string());
        } else if quality.value >= 80.0 {
            opportunities.push("High quality product".to_string());
        }
    }

    for (dimension, score) in scores.present() {
        if score.confidence < 0.5 {
            risks.push(format!(
                "Limited {} data ({:.0}% of inputs available)",
                dimension,
                score.confidence * 100.0
            ));
        }
    }
    for dimension in scores.missing() {
        if weights.get(dimension).is_some_and(|w| w > 0.0) {
            risks.push(format!("No {} data available", dimension));
        }
    }

    (risks, opportunities)
}

/// Default interpretation shared by all strategies.
pub fn interpret_scores(
    weights: &DimensionWeights,
    action_thresholds: ActionThresholds,
    urgency_thresholds: UrgencyThresholds,
    scores: &DimensionalScores,
) -> Interpretation {
    let (mut risks, opportunities) = risks_and_opportunities(weights, scores);
    let urgency = urgency_for(scores.availability.as_ref(), urgency_thresholds);

    let parts = contributions(weights, scores);
    let Some((value, confidence)) = weighted_overall(weights, scores) else {
        risks.insert(0, "Insufficient data to score this product".to_string());
        return Interpretation {
            overall: AnalysisScore::new(
                0.0,
                0.0,
                "Insufficient data: no dimension produced a score",
            ),
            action: Action::Pass,
            urgency,
            estimated_roi: None,
            time_horizon: None,
            risks,
            opportunities,
        };
    };

    let mut ranked = parts.clone();
    ranked.sort_by(|a, b| {
        (b.weight * b.score.value)
            .partial_cmp(&(a.weight * a.score.value))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.dimension.cmp(&b.dimension))
    });
    let reasoning = ranked
        .iter()
        .take(2)
        .map(|c| {
            format!(
                "{} {:.0}/100 ({:.0}% weight): {}",
                c.dimension.label(),
                c.score.value,
                c.weight * 100.0,
                c.score.reasoning
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    let mut data_points = BTreeMap::new();
    for c in &parts {
        data_points.insert(format!("{}_weight", c.dimension), json!(c.weight));
        data_points.insert(format!("{}_score", c.dimension), json!(c.score.value));
    }
    data_points.insert("dimensions_used".to_string(), json!(parts.len()));

    let breakdown = ScoreBreakdown {
        components: parts
            .iter()
            .map(|c| ScoreComponent {
                name: c.dimension.to_string(),
                weight: c.weight,
                score: c.score.value,
                raw_value: json!(c.score.value),
                calculation: format!(
                    "{:.2} × {:.1} = {:.2}",
                    c.weight,
                    c.score.value,
                    c.weight * c.score.value
                ),
                reasoning: c.score.reasoning.clone(),
            })
            .collect(),
        formula: "Σ(weight × score) / Σ(weight) over scored dimensions".to_string(),
        total: value.round(),
        missing_data: scores.missing().iter().map(|d| d.to_string()).collect(),
        ..Default::default()
    };

    Interpretation {
        overall: AnalysisScore::new(value, confidence, reasoning)
            .with_data_points(data_points)
            .with_breakdown(breakdown),
        action: action_for(value, action_thresholds),
        urgency,
        estimated_roi: None,
        time_horizon: None,
        risks,
        opportunities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: f64, c: f64) -> Option<AnalysisScore> {
        Some(AnalysisScore::new(v, c, "test"))
    }

    const ACTIONS: ActionThresholds = ActionThresholds {
        strong_buy: 80.0,
        buy: 65.0,
        hold: 45.0,
    };
    const URGENCY: UrgencyThresholds = UrgencyThresholds {
        urgent: 80.0,
        moderate: 60.0,
        low: 40.0,
    };

    #[test]
    fn test_missing_dimension_leaves_denominator() {
        let weights = DimensionWeights::new(&[
            (Dimension::Demand, 0.5),
            (Dimension::Availability, 0.3),
            (Dimension::Quality, 0.2),
        ]);
        let scores = DimensionalScores {
            demand: score(80.0, 1.0),
            availability: None,
            quality: score(30.0, 0.5),
        };
        let (value, confidence) = weighted_overall(&weights, &scores).unwrap();
        // (0.5*80 + 0.2*30) / 0.7
        assert!((value - 46.0 / 0.7).abs() < 1e-9);
        assert!((confidence - (0.5 + 0.1) / 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_no_scores_means_pass_with_zero_confidence() {
        let weights = DimensionWeights::new(&[(Dimension::Demand, 1.0)]);
        let result = interpret_scores(&weights, ACTIONS, URGENCY, &DimensionalScores::default());
        assert_eq!(result.action, Action::Pass);
        assert_eq!(result.overall.confidence, 0.0);
        assert!(result.risks.iter().any(|r| r.contains("Insufficient data")));
        assert!(result.risks.iter().any(|r| r == "No demand data available"));
    }

    #[test]
    fn test_action_cut_points_are_inclusive() {
        assert_eq!(action_for(80.0, ACTIONS), Action::StrongBuy);
        assert_eq!(action_for(65.0, ACTIONS), Action::Buy);
        assert_eq!(action_for(45.0, ACTIONS), Action::Hold);
        assert_eq!(action_for(44.9, ACTIONS), Action::Pass);
    }

    #[test]
    fn test_urgency_without_availability_is_no_rush() {
        assert_eq!(urgency_for(None, URGENCY), Urgency::NoRush);
        let avail = AnalysisScore::new(85.0, 1.0, "a");
        assert_eq!(urgency_for(Some(&avail), URGENCY), Urgency::Urgent);
    }

    #[test]
    fn test_threshold_rules_fire() {
        let weights =
            DimensionWeights::new(&[(Dimension::Demand, 0.5), (Dimension::Availability, 0.5)]);
        let scores = DimensionalScores {
            demand: score(20.0, 1.0),
            availability: score(90.0, 0.3),
            quality: None,
        };
        let (risks, opps) = risks_and_opportunities(&weights, &scores);
        assert!(risks.contains(&"Low market demand".to_string()));
        assert!(opps.contains(&"Scarcity value".to_string()));
        assert!(risks.iter().any(|r| r.starts_with("Limited availability data")));
        // quality carries no weight here, so its absence is not a risk
        assert!(!risks.iter().any(|r| r.contains("quality")));
    }
}
