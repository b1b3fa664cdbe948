use crate::domain::entities::product::Product;
use crate::domain::error::DomainError;

#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, product_id: &str) -> Result<Option<Product>, DomainError>;
    /// Missing ids are simply absent from the result.
    async fn find_by_ids(&self, product_ids: &[String]) -> Result<Vec<Product>, DomainError>;
}
