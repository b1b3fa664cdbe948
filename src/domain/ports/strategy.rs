//! Strategy port: a weight vector plus an interpretation policy.
//!
//! Every strategy shares one scoring core ([`interpret_scores`]); they differ
//! in weights and thresholds, and may override [`Strategy::interpret`] to add
//! narrative on top of the base result without touching the math.

use crate::domain::analysis::interpretation::{interpret_scores, Interpretation};
use crate::domain::analysis::score::{DimensionWeights, DimensionalScores};

/// Minimum overall score for each action. Anything below `hold` is a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionThresholds {
    pub strong_buy: f64,
    pub buy: f64,
    pub hold: f64,
}

/// Minimum availability score for each urgency. Below `low` is no rush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrgencyThresholds {
    pub urgent: f64,
    pub moderate: f64,
    pub low: f64,
}

pub trait Strategy: Send + Sync {
    /// Display name, also the lookup key (matched case-insensitively).
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn weights(&self) -> DimensionWeights;

    fn action_thresholds(&self) -> ActionThresholds;

    fn urgency_thresholds(&self) -> UrgencyThresholds;

    /// Base discount below intrinsic value required before buying (0–1).
    fn margin_of_safety(&self) -> f64;

    fn interpret(&self, scores: &DimensionalScores) -> Interpretation {
        interpret_scores(
            &self.weights(),
            self.action_thresholds(),
            self.urgency_thresholds(),
            scores,
        )
    }
}
