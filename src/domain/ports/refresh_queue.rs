use crate::domain::error::DomainError;

/// Optional sink for catalog numbers whose price guide needs (re)scraping.
///
/// The aggregator works without one; when configured it is told about every
/// catalog number that blocked an analysis with incomplete data.
#[async_trait::async_trait]
pub trait RefreshQueue: Send + Sync {
    async fn enqueue(&self, catalog_numbers: &[String]) -> Result<(), DomainError>;

    fn name(&self) -> &str;
}
