use crate::domain::entities::sentiment::SentimentRecord;
use crate::domain::error::DomainError;
use std::collections::HashMap;

#[async_trait::async_trait]
pub trait SentimentRepository: Send + Sync {
    async fn find_by_catalog_number(
        &self,
        catalog_number: &str,
    ) -> Result<Option<SentimentRecord>, DomainError>;

    async fn find_by_catalog_numbers(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, SentimentRecord>, DomainError>;
}
