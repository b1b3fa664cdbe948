pub mod aggregation;
pub mod analyzers;
pub mod builders;
pub mod recommend;
pub mod strategies;
pub mod valuation;
