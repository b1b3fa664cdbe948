//! JSON seed bundles for loading collaborator data into the database.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::entities::market_record::MarketRecord;
use crate::domain::entities::product::Product;
use crate::domain::entities::retirement::RetirementRecord;
use crate::domain::entities::sales_statistics::SalesStatistics;
use crate::domain::entities::sentiment::SentimentRecord;
use crate::domain::error::DomainError;

use super::SqliteRepositories;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedBundle {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub market_records: Vec<MarketRecord>,
    #[serde(default)]
    pub sales_statistics: Vec<SalesStatistics>,
    #[serde(default)]
    pub sentiment: Vec<SentimentRecord>,
    #[serde(default)]
    pub retirement: Vec<RetirementRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub products: usize,
    pub market_records: usize,
    pub sales_statistics: usize,
    pub sentiment: usize,
    pub retirement: usize,
}

impl SeedBundle {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::InvalidInput(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Upsert every record in the bundle. Existing rows with the same key are replaced.
pub fn import_bundle(
    repos: &SqliteRepositories,
    bundle: &SeedBundle,
) -> Result<ImportSummary, DomainError> {
    for product in &bundle.products {
        repos.products.upsert(product)?;
    }
    for record in &bundle.market_records {
        repos.market.upsert_record(record)?;
    }
    for stats in &bundle.sales_statistics {
        repos.market.upsert_statistics(stats)?;
    }
    for record in &bundle.sentiment {
        repos.sentiment.upsert(record)?;
    }
    for record in &bundle.retirement {
        repos.retirement.upsert(record)?;
    }

    let summary = ImportSummary {
        products: bundle.products.len(),
        market_records: bundle.market_records.len(),
        sales_statistics: bundle.sales_statistics.len(),
        sentiment: bundle.sentiment.len(),
        retirement: bundle.retirement.len(),
    };
    info!(?summary, "seed bundle imported");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::product_repository::ProductRepository;

    #[tokio::test]
    async fn test_partial_bundle_imports() {
        let repos = SqliteRepositories::open(":memory:").unwrap();
        let bundle: SeedBundle = serde_json::from_str(
            r#"{"products": [{"product_id": "p1", "name": "Rivendell", "catalog_number": "10316-1", "retail_price": 49999}]}"#,
        )
        .unwrap();
        let summary = import_bundle(&repos, &bundle).unwrap();
        assert_eq!(summary.products, 1);
        assert_eq!(summary.market_records, 0);

        let product = repos.products.find_by_id("p1").await.unwrap().unwrap();
        assert_eq!(product.catalog_number.as_deref(), Some("10316-1"));
    }
}
