//! Strategies: weight renormalization, thresholds and the registry.

use brickscout::application::strategies::{
    BargainHunter, InvestmentFocus, QuickFlip, StrategyRegistry,
};
use brickscout::domain::analysis::interpretation::{interpret_scores, weighted_overall};
use brickscout::domain::analysis::score::{AnalysisScore, DimensionWeights, DimensionalScores};
use brickscout::domain::error::DomainError;
use brickscout::domain::ports::strategy::Strategy;
use brickscout::domain::values::action::{Action, Urgency};
use brickscout::domain::values::dimension::Dimension;

fn score(value: f64) -> Option<AnalysisScore> {
    Some(AnalysisScore::new(value, 1.0, format!("scored {value}")))
}

#[test]
fn test_missing_dimension_drops_out_of_denominator() {
    let weights = DimensionWeights::new(&[
        (Dimension::Demand, 0.4),
        (Dimension::Availability, 0.4),
        (Dimension::Quality, 0.2),
    ]);
    let full = DimensionalScores {
        demand: score(80.0),
        availability: score(60.0),
        quality: score(0.0),
    };
    let partial = DimensionalScores {
        quality: None,
        ..full.clone()
    };
    let (with_zero, _) = weighted_overall(&weights, &full).unwrap();
    let (without, _) = weighted_overall(&weights, &partial).unwrap();
    assert!((with_zero - 56.0).abs() < 1e-9);
    // (0.4 × 80 + 0.4 × 60) / 0.8
    assert!((without - 70.0).abs() < 1e-9);
}

#[test]
fn test_nothing_scored_is_pass_with_zero_confidence() {
    let result = InvestmentFocus.interpret(&DimensionalScores::default());
    assert_eq!(result.action, Action::Pass);
    assert_eq!(result.urgency, Urgency::NoRush);
    assert_eq!(result.overall.confidence, 0.0);
    assert!(result.risks.iter().any(|r| r.contains("Insufficient data")));
}

#[test]
fn test_same_scores_differ_by_strategy() {
    let scores = DimensionalScores {
        demand: score(85.0),
        availability: score(40.0),
        quality: score(45.0),
    };
    let flip = QuickFlip.interpret(&scores);
    let bargain = BargainHunter.interpret(&scores);
    let invest = InvestmentFocus.interpret(&scores);
    assert!(flip.overall.value > invest.overall.value);
    assert_eq!(flip.action, Action::Buy);
    assert!(bargain.action != Action::StrongBuy);
    assert_eq!(flip.time_horizon.as_deref(), Some("0-3 months"));
}

#[test]
fn test_risk_and_opportunity_rules() {
    let weights = InvestmentFocus.weights();
    let scores = DimensionalScores {
        demand: score(20.0),
        availability: score(90.0),
        quality: None,
    };
    let result = interpret_scores(
        &weights,
        InvestmentFocus.action_thresholds(),
        InvestmentFocus.urgency_thresholds(),
        &scores,
    );
    assert!(result.risks.contains(&"Low market demand".to_string()));
    assert!(result.risks.contains(&"No quality data available".to_string()));
    assert!(result.opportunities.contains(&"Scarcity value".to_string()));
    assert_eq!(result.urgency, Urgency::Urgent);
}

#[test]
fn test_reasoning_names_top_contributors() {
    let scores = DimensionalScores {
        demand: score(30.0),
        availability: score(90.0),
        quality: score(50.0),
    };
    let result = InvestmentFocus.interpret(&scores);
    assert!(result.overall.reasoning.starts_with("Availability 90/100"));
}

#[test]
fn test_registry_unknown_strategy() {
    let registry = StrategyRegistry::with_defaults();
    let err = registry.get("yolo").err().unwrap();
    assert!(matches!(err, DomainError::UnknownStrategy { .. }));
    assert!(err.to_string().contains("Investment Focus"));
}
