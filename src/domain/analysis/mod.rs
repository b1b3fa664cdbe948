pub mod input;
pub mod interpretation;
pub mod recommendation;
pub mod score;
pub mod valuation;
