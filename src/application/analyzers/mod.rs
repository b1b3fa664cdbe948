pub mod availability;
pub mod demand;
pub mod quality;
pub mod scoring;

use crate::domain::ports::analyzer::Analyzer;

use self::availability::AvailabilityAnalyzer;
use self::demand::DemandAnalyzer;
use self::quality::QualityAnalyzer;

/// The three dimension analyzers, in canonical dimension order.
pub fn default_analyzers(expected_brand: &str) -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(DemandAnalyzer),
        Box::new(AvailabilityAnalyzer),
        Box::new(QualityAnalyzer::new(expected_brand)),
    ]
}
