use crate::domain::entities::retirement::RetirementRecord;
use crate::domain::error::DomainError;
use std::collections::HashMap;

/// Retirement timing plus catalog metadata (theme, parts count, release year).
#[async_trait::async_trait]
pub trait RetirementRepository: Send + Sync {
    async fn find_by_catalog_number(
        &self,
        catalog_number: &str,
    ) -> Result<Option<RetirementRecord>, DomainError>;

    async fn find_by_catalog_numbers(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, RetirementRecord>, DomainError>;
}
