//! Quick Flip: resell within weeks. Only current demand and short-term
//! scarcity matter; quality barely moves the needle.

use crate::domain::analysis::interpretation::{interpret_scores, Interpretation};
use crate::domain::analysis::score::{DimensionWeights, DimensionalScores};
use crate::domain::ports::strategy::{ActionThresholds, Strategy, UrgencyThresholds};
use crate::domain::values::dimension::Dimension;

const MAX_ROI_PCT: f64 = 30.0;
const OVERHEATED_RSI: f64 = 80.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct QuickFlip;

impl Strategy for QuickFlip {
    fn name(&self) -> &'static str {
        "Quick Flip"
    }

    fn description(&self) -> &'static str {
        "Short-term resale: driven by live sales velocity and momentum"
    }

    fn weights(&self) -> DimensionWeights {
        DimensionWeights::new(&[
            (Dimension::Demand, 0.55),
            (Dimension::Availability, 0.35),
            (Dimension::Quality, 0.10),
        ])
    }

    fn action_thresholds(&self) -> ActionThresholds {
        ActionThresholds {
            strong_buy: 70.0,
            buy: 55.0,
            hold: 40.0,
        }
    }

    fn urgency_thresholds(&self) -> UrgencyThresholds {
        UrgencyThresholds {
            urgent: 75.0,
            moderate: 55.0,
            low: 35.0,
        }
    }

    fn margin_of_safety(&self) -> f64 {
        0.25
    }

    fn interpret(&self, scores: &DimensionalScores) -> Interpretation {
        let mut result = interpret_scores(
            &self.weights(),
            self.action_thresholds(),
            self.urgency_thresholds(),
            scores,
        );
        let Some(demand) = scores.demand.as_ref() else {
            return result;
        };

        result.time_horizon = Some("0-3 months".to_string());
        result.estimated_roi = Some(((demand.value - 50.0) * 0.6).clamp(0.0, MAX_ROI_PCT));
        if let Some(rsi) = demand.data_point_f64("rsi") {
            if rsi > OVERHEATED_RSI {
                result.risks.push(format!(
                    "Overheated market (RSI {rsi:.0}): prices may correct before resale"
                ));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::score::AnalysisScore;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_roi_tracks_demand() {
        let scores = DimensionalScores {
            demand: Some(AnalysisScore::new(90.0, 1.0, "hot")),
            ..Default::default()
        };
        let result = QuickFlip.interpret(&scores);
        assert_eq!(result.estimated_roi, Some(24.0));
        assert_eq!(result.time_horizon.as_deref(), Some("0-3 months"));
    }

    #[test]
    fn test_overheated_rsi_is_a_risk() {
        let mut points = BTreeMap::new();
        points.insert("rsi".to_string(), json!(86.0));
        let scores = DimensionalScores {
            demand: Some(AnalysisScore::new(70.0, 1.0, "hot").with_data_points(points)),
            ..Default::default()
        };
        let result = QuickFlip.interpret(&scores);
        assert!(result.risks.iter().any(|r| r.starts_with("Overheated market")));
    }

    #[test]
    fn test_without_demand_no_roi() {
        let scores = DimensionalScores {
            availability: Some(AnalysisScore::new(90.0, 1.0, "scarce")),
            ..Default::default()
        };
        assert!(QuickFlip.interpret(&scores).estimated_roi.is_none());
    }
}
