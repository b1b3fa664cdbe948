//! Data aggregation use case: fans out to the collaborator repositories and
//! builds normalized analysis inputs.
//!
//! Batch mode issues one request per source for the whole batch, keyed by the
//! deduplicated catalog numbers, and validates every product's price guide
//! before building anything.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::application::builders::{build_input, validate_completeness, RelatedRecords};
use crate::domain::analysis::input::ProductAnalysisInput;
use crate::domain::entities::product::Product;
use crate::domain::error::{DomainError, IncompleteProduct};
use crate::domain::ports::market_repository::MarketRepository;
use crate::domain::ports::product_repository::ProductRepository;
use crate::domain::ports::refresh_queue::RefreshQueue;
use crate::domain::ports::retirement_repository::RetirementRepository;
use crate::domain::ports::sentiment_repository::SentimentRepository;

/// The four collaborator repositories the aggregator reads from.
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn ProductRepository>,
    pub market: Arc<dyn MarketRepository>,
    pub sentiment: Arc<dyn SentimentRepository>,
    pub retirement: Arc<dyn RetirementRepository>,
}

pub struct DataAggregator {
    repos: Repositories,
    refresh_queue: Option<Arc<dyn RefreshQueue>>,
    reference_date: Option<NaiveDate>,
}

impl DataAggregator {
    /// `refresh_queue` is optional: without one, incomplete price guides are
    /// reported to the caller and nothing is scheduled.
    pub fn new(repos: Repositories, refresh_queue: Option<Arc<dyn RefreshQueue>>) -> Self {
        Self {
            repos,
            refresh_queue,
            reference_date: None,
        }
    }

    /// Pin the date used for "days until retirement" math. Defaults to today (UTC).
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Build the analysis input for one product.
    ///
    /// Fails with `NotFound` when the product does not exist and with
    /// `IncompleteData` when its price guide is missing a box. A product with
    /// no catalog number skips every related lookup.
    pub async fn aggregate_product_data(
        &self,
        product_id: &str,
    ) -> Result<ProductAnalysisInput, DomainError> {
        let product = self
            .repos
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("product {product_id}")))?;

        let as_of = self.reference_date();
        let Some(catalog_number) = product.catalog_number.clone() else {
            debug!(product_id, "no catalog number, skipping related lookups");
            return Ok(build_input(&product, RelatedRecords::default(), as_of));
        };

        let (market, sales, sentiment, retirement) = tokio::try_join!(
            self.repos.market.find_by_catalog_number(&catalog_number),
            self.repos.market.sales_statistics(&catalog_number),
            self.repos.sentiment.find_by_catalog_number(&catalog_number),
            self.repos.retirement.find_by_catalog_number(&catalog_number),
        )?;

        if let Some(incomplete) = validate_completeness(&product, market.as_ref()) {
            warn!(product_id, %incomplete, "price guide incomplete");
            self.request_refresh(&[incomplete.clone()]).await;
            return Err(DomainError::IncompleteData(vec![incomplete]));
        }

        let related = RelatedRecords {
            market: market.as_ref(),
            sales: sales.as_ref(),
            sentiment: sentiment.as_ref(),
            retirement: retirement.as_ref(),
        };
        Ok(build_input(&product, related, as_of))
    }

    /// Fetch products by id in one request. Any unknown id fails the call.
    pub async fn fetch_products(
        &self,
        product_ids: &[String],
    ) -> Result<Vec<Product>, DomainError> {
        let unique: Vec<String> = dedup_in_order(product_ids);
        let found = self.repos.products.find_by_ids(&unique).await?;
        let mut by_id: HashMap<String, Product> =
            found.into_iter().map(|p| (p.product_id.clone(), p)).collect();

        let missing: Vec<&str> = unique
            .iter()
            .filter(|id| !by_id.contains_key(id.as_str()))
            .map(|id| id.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::NotFound(format!("products {}", missing.join(", "))));
        }

        Ok(unique.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Build analysis inputs for many products with one request per source.
    ///
    /// All-or-nothing: if any catalogued product has an incomplete price
    /// guide, the whole call fails and the error lists every offender.
    pub async fn aggregate_products_data(
        &self,
        products: &[Product],
    ) -> Result<HashMap<String, ProductAnalysisInput>, DomainError> {
        let catalog_numbers: Vec<String> = products
            .iter()
            .filter_map(|p| p.catalog_number.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        debug!(
            products = products.len(),
            catalog_numbers = catalog_numbers.len(),
            "fetching related records in batch"
        );

        let (market, sales, sentiment, retirement) = if catalog_numbers.is_empty() {
            Default::default()
        } else {
            tokio::try_join!(
                self.repos.market.find_by_catalog_numbers(&catalog_numbers),
                self.repos.market.sales_statistics_batch(&catalog_numbers),
                self.repos.sentiment.find_by_catalog_numbers(&catalog_numbers),
                self.repos.retirement.find_by_catalog_numbers(&catalog_numbers),
            )?
        };

        let incomplete: Vec<IncompleteProduct> = products
            .iter()
            .filter_map(|p| {
                let record = p.catalog_number.as_ref().and_then(|c| market.get(c));
                validate_completeness(p, record)
            })
            .collect();
        if !incomplete.is_empty() {
            let ids: Vec<&str> = incomplete.iter().map(|i| i.product_id.as_str()).collect();
            warn!(products = ?ids, "batch blocked by incomplete price guides");
            self.request_refresh(&incomplete).await;
            return Err(DomainError::IncompleteData(incomplete));
        }

        let as_of = self.reference_date();
        let inputs = products
            .iter()
            .map(|p| {
                let related = match p.catalog_number.as_ref() {
                    Some(c) => RelatedRecords {
                        market: market.get(c),
                        sales: sales.get(c),
                        sentiment: sentiment.get(c),
                        retirement: retirement.get(c),
                    },
                    None => RelatedRecords::default(),
                };
                (p.product_id.clone(), build_input(p, related, as_of))
            })
            .collect();
        Ok(inputs)
    }

    async fn request_refresh(&self, incomplete: &[IncompleteProduct]) {
        let Some(queue) = &self.refresh_queue else {
            debug!("no refresh queue configured, nothing scheduled");
            return;
        };
        let catalog_numbers: Vec<String> = incomplete
            .iter()
            .map(|i| i.catalog_number.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if let Err(e) = queue.enqueue(&catalog_numbers).await {
            warn!(queue = queue.name(), error = %e, "failed to enqueue price guide refresh");
        }
    }
}

fn dedup_in_order(ids: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
