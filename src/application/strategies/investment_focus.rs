//! Investment Focus: buy sets ahead of or just after retirement and hold
//! through the appreciation phase. Scarcity dominates the weighting.

use crate::domain::analysis::interpretation::{interpret_scores, Interpretation};
use crate::domain::analysis::score::{DimensionWeights, DimensionalScores};
use crate::domain::ports::strategy::{ActionThresholds, Strategy, UrgencyThresholds};
use crate::domain::values::dimension::Dimension;

/// Overall score at which the estimated return starts to exceed zero.
const ROI_FLOOR_SCORE: f64 = 40.0;
const MAX_ROI_PCT: f64 = 60.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct InvestmentFocus;

impl Strategy for InvestmentFocus {
    fn name(&self) -> &'static str {
        "Investment Focus"
    }

    fn description(&self) -> &'static str {
        "Long-term holds: favors sets near or past retirement where fixed supply drives appreciation"
    }

    fn weights(&self) -> DimensionWeights {
        DimensionWeights::new(&[
            (Dimension::Availability, 0.55),
            (Dimension::Demand, 0.30),
            (Dimension::Quality, 0.15),
        ])
    }

    fn action_thresholds(&self) -> ActionThresholds {
        ActionThresholds {
            strong_buy: 75.0,
            buy: 55.0,
            hold: 40.0,
        }
    }

    fn urgency_thresholds(&self) -> UrgencyThresholds {
        UrgencyThresholds {
            urgent: 80.0,
            moderate: 60.0,
            low: 40.0,
        }
    }

    fn margin_of_safety(&self) -> f64 {
        0.20
    }

    fn interpret(&self, scores: &DimensionalScores) -> Interpretation {
        let mut result = interpret_scores(
            &self.weights(),
            self.action_thresholds(),
            self.urgency_thresholds(),
            scores,
        );
        if scores.present().next().is_none() {
            return result;
        }

        let phase = scores
            .availability
            .as_ref()
            .and_then(|a| a.data_points.get("retirement_phase"))
            .and_then(|v| v.as_str());
        let horizon = match phase {
            Some("pre_retirement") => {
                result
                    .opportunities
                    .push("Pre-retirement window: accumulate before supply ends".to_string());
                "1-3 years (pre-retirement accumulation)"
            }
            Some("retired") => {
                result
                    .opportunities
                    .push("Appreciation phase: retired set with fixed supply".to_string());
                "2-5 years (appreciation phase)"
            }
            _ => "3-5 years",
        };
        result.time_horizon = Some(horizon.to_string());

        let roi =
            (result.overall.value - ROI_FLOOR_SCORE) / (100.0 - ROI_FLOOR_SCORE) * MAX_ROI_PCT;
        result.estimated_roi = Some(roi.clamp(0.0, MAX_ROI_PCT));
        result
    }
}
