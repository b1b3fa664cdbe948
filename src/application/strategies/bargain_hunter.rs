//! Bargain Hunter: well-made, in-demand sets bought at a deep discount.

use crate::domain::analysis::interpretation::{interpret_scores, Interpretation};
use crate::domain::analysis::score::{DimensionWeights, DimensionalScores};
use crate::domain::ports::strategy::{ActionThresholds, Strategy, UrgencyThresholds};
use crate::domain::values::dimension::Dimension;

#[derive(Debug, Default, Clone, Copy)]
pub struct BargainHunter;

impl Strategy for BargainHunter {
    fn name(&self) -> &'static str {
        "Bargain Hunter"
    }

    fn description(&self) -> &'static str {
        "Value buys: balances quality and demand and insists on a wide margin of safety"
    }

    fn weights(&self) -> DimensionWeights {
        DimensionWeights::new(&[
            (Dimension::Quality, 0.40),
            (Dimension::Demand, 0.40),
            (Dimension::Availability, 0.20),
        ])
    }

    fn action_thresholds(&self) -> ActionThresholds {
        ActionThresholds {
            strong_buy: 80.0,
            buy: 65.0,
            hold: 45.0,
        }
    }

    fn urgency_thresholds(&self) -> UrgencyThresholds {
        UrgencyThresholds {
            urgent: 85.0,
            moderate: 65.0,
            low: 40.0,
        }
    }

    fn margin_of_safety(&self) -> f64 {
        0.30
    }

    fn interpret(&self, scores: &DimensionalScores) -> Interpretation {
        let mut result = interpret_scores(
            &self.weights(),
            self.action_thresholds(),
            self.urgency_thresholds(),
            scores,
        );
        let quality = scores.quality.as_ref().map(|s| s.value);
        let demand = scores.demand.as_ref().map(|s| s.value);

        if let (Some(q), Some(d)) = (quality, demand) {
            if q >= 70.0 && d >= 60.0 {
                result
                    .opportunities
                    .push("Quality goods with proven demand".to_string());
            }
            if d >= 75.0 && q < 50.0 {
                result
                    .risks
                    .push("Overpaying for hype: demand outpaces quality".to_string());
            }
        }
        if scores.present().next().is_some() {
            result.time_horizon = Some("6-12 months".to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::score::AnalysisScore;

    #[test]
    fn test_hype_risk() {
        let scores = DimensionalScores {
            demand: Some(AnalysisScore::new(90.0, 1.0, "hot")),
            quality: Some(AnalysisScore::new(30.0, 1.0, "meh")),
            availability: None,
        };
        let result = BargainHunter.interpret(&scores);
        assert!(result.risks.iter().any(|r| r.starts_with("Overpaying for hype")));
    }

    #[test]
    fn test_quality_with_demand_opportunity() {
        let scores = DimensionalScores {
            demand: Some(AnalysisScore::new(65.0, 1.0, "steady")),
            quality: Some(AnalysisScore::new(85.0, 1.0, "great")),
            availability: None,
        };
        let result = BargainHunter.interpret(&scores);
        assert!(result
            .opportunities
            .contains(&"Quality goods with proven demand".to_string()));
        assert_eq!(result.time_horizon.as_deref(), Some("6-12 months"));
    }
}
