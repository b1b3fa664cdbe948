use crate::domain::analysis::input::ProductAnalysisInput;
use crate::domain::analysis::score::AnalysisScore;
use crate::domain::values::dimension::Dimension;

/// Scores one dimension of a product from its slice of the normalized input.
///
/// Returns `None` when none of the analyzer's qualifying inputs are present.
/// Callers must leave such a dimension out of any weighted average.
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn dimension(&self) -> Dimension;

    fn analyze(&self, input: &ProductAnalysisInput) -> Option<AnalysisScore>;
}
