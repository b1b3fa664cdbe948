//! Secondary-market port: price-guide boxes and past-sales statistics.

use crate::domain::entities::market_record::MarketRecord;
use crate::domain::entities::sales_statistics::SalesStatistics;
use crate::domain::error::DomainError;
use std::collections::HashMap;

/// Batch methods return maps keyed by catalog number and must cost one
/// round-trip regardless of how many keys are passed.
#[async_trait::async_trait]
pub trait MarketRepository: Send + Sync {
    async fn find_by_catalog_number(
        &self,
        catalog_number: &str,
    ) -> Result<Option<MarketRecord>, DomainError>;

    async fn find_by_catalog_numbers(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, MarketRecord>, DomainError>;

    async fn sales_statistics(
        &self,
        catalog_number: &str,
    ) -> Result<Option<SalesStatistics>, DomainError>;

    async fn sales_statistics_batch(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, SalesStatistics>, DomainError>;
}
