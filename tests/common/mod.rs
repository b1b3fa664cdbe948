//! Shared test helpers: an in-memory catalog that counts every repository
//! call, plus builders for realistic records.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use brickscout::application::aggregation::{DataAggregator, Repositories};
use brickscout::config::Config;
use brickscout::domain::entities::market_record::MarketRecord;
use brickscout::domain::entities::product::Product;
use brickscout::domain::entities::retirement::RetirementRecord;
use brickscout::domain::entities::sales_statistics::SalesStatistics;
use brickscout::domain::entities::sentiment::SentimentRecord;
use brickscout::domain::error::DomainError;
use brickscout::domain::ports::market_repository::MarketRepository;
use brickscout::domain::ports::product_repository::ProductRepository;
use brickscout::domain::ports::refresh_queue::RefreshQueue;
use brickscout::domain::ports::retirement_repository::RetirementRepository;
use brickscout::domain::ports::sentiment_repository::SentimentRepository;
use brickscout::domain::values::money::Cents;
use brickscout::domain::values::price_box::PriceBox;
use brickscout::BrickScout;
use chrono::NaiveDate;

pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

/// Per-method call log: one entry per call, holding the number of keys asked for.
#[derive(Default)]
pub struct CallLog {
    calls: Mutex<HashMap<&'static str, Vec<usize>>>,
    total: AtomicUsize,
}

impl CallLog {
    fn record(&self, method: &'static str, keys: usize) {
        self.total.fetch_add(1, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push(keys);
    }

    pub fn calls(&self, method: &str) -> Vec<usize> {
        self.calls
            .lock()
            .unwrap()
            .get(method)
            .cloned()
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pub products: HashMap<String, Product>,
    pub market: HashMap<String, MarketRecord>,
    pub sales: HashMap<String, SalesStatistics>,
    pub sentiment: HashMap<String, SentimentRecord>,
    pub retirement: HashMap<String, RetirementRecord>,
    pub log: CallLog,
}

impl FakeCatalog {
    pub fn add_product(&mut self, product: Product) {
        self.products.insert(product.product_id.clone(), product);
    }

    pub fn add_market(&mut self, record: MarketRecord) {
        self.market.insert(record.catalog_number.clone(), record);
    }

    pub fn add_retirement(&mut self, record: RetirementRecord) {
        self.retirement.insert(record.catalog_number.clone(), record);
    }

    pub fn add_sales(&mut self, stats: SalesStatistics) {
        self.sales.insert(stats.catalog_number.clone(), stats);
    }

    pub fn add_sentiment(&mut self, record: SentimentRecord) {
        self.sentiment.insert(record.catalog_number.clone(), record);
    }

    pub fn into_repositories(self) -> (Arc<FakeCatalog>, Repositories) {
        let catalog = Arc::new(self);
        let repos = Repositories {
            products: catalog.clone(),
            market: catalog.clone(),
            sentiment: catalog.clone(),
            retirement: catalog.clone(),
        };
        (catalog, repos)
    }
}

fn pick<T: Clone>(map: &HashMap<String, T>, keys: &[String]) -> HashMap<String, T> {
    keys.iter()
        .filter_map(|k| map.get(k).map(|v| (k.clone(), v.clone())))
        .collect()
}

#[async_trait::async_trait]
impl ProductRepository for FakeCatalog {
    async fn find_by_id(&self, product_id: &str) -> Result<Option<Product>, DomainError> {
        self.log.record("products.find_by_id", 1);
        Ok(self.products.get(product_id).cloned())
    }

    async fn find_by_ids(&self, product_ids: &[String]) -> Result<Vec<Product>, DomainError> {
        self.log.record("products.find_by_ids", product_ids.len());
        Ok(product_ids
            .iter()
            .filter_map(|id| self.products.get(id).cloned())
            .collect())
    }
}

#[async_trait::async_trait]
impl MarketRepository for FakeCatalog {
    async fn find_by_catalog_number(
        &self,
        catalog_number: &str,
    ) -> Result<Option<MarketRecord>, DomainError> {
        self.log.record("market.find_by_catalog_number", 1);
        Ok(self.market.get(catalog_number).cloned())
    }

    async fn find_by_catalog_numbers(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, MarketRecord>, DomainError> {
        self.log.record("market.find_by_catalog_numbers", catalog_numbers.len());
        Ok(pick(&self.market, catalog_numbers))
    }

    async fn sales_statistics(
        &self,
        catalog_number: &str,
    ) -> Result<Option<SalesStatistics>, DomainError> {
        self.log.record("market.sales_statistics", 1);
        Ok(self.sales.get(catalog_number).cloned())
    }

    async fn sales_statistics_batch(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, SalesStatistics>, DomainError> {
        self.log.record("market.sales_statistics_batch", catalog_numbers.len());
        Ok(pick(&self.sales, catalog_numbers))
    }
}

#[async_trait::async_trait]
impl SentimentRepository for FakeCatalog {
    async fn find_by_catalog_number(
        &self,
        catalog_number: &str,
    ) -> Result<Option<SentimentRecord>, DomainError> {
        self.log.record("sentiment.find_by_catalog_number", 1);
        Ok(self.sentiment.get(catalog_number).cloned())
    }

    async fn find_by_catalog_numbers(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, SentimentRecord>, DomainError> {
        self.log.record("sentiment.find_by_catalog_numbers", catalog_numbers.len());
        Ok(pick(&self.sentiment, catalog_numbers))
    }
}

#[async_trait::async_trait]
impl RetirementRepository for FakeCatalog {
    async fn find_by_catalog_number(
        &self,
        catalog_number: &str,
    ) -> Result<Option<RetirementRecord>, DomainError> {
        self.log.record("retirement.find_by_catalog_number", 1);
        Ok(self.retirement.get(catalog_number).cloned())
    }

    async fn find_by_catalog_numbers(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, RetirementRecord>, DomainError> {
        self.log.record("retirement.find_by_catalog_numbers", catalog_numbers.len());
        Ok(pick(&self.retirement, catalog_numbers))
    }
}

/// Refresh queue that remembers what it was asked to enqueue.
#[derive(Default)]
pub struct RecordingQueue {
    pub enqueued: Mutex<Vec<Vec<String>>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl RefreshQueue for RecordingQueue {
    async fn enqueue(&self, catalog_numbers: &[String]) -> Result<(), DomainError> {
        self.enqueued.lock().unwrap().push(catalog_numbers.to_vec());
        if self.fail {
            return Err(DomainError::Database("queue offline".into()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

// ── Record builders ──────────────────────────────────────────────────────

pub fn product(id: &str, catalog: Option<&str>) -> Product {
    let mut p = Product::new(id, format!("Set {id}"));
    p.catalog_number = catalog.map(String::from);
    p
}

pub fn price_box(avg: Option<i64>) -> PriceBox {
    PriceBox {
        avg_price: avg.map(Cents),
        ..Default::default()
    }
}

/// A price guide with every box scraped.
pub fn complete_market(
    catalog: &str,
    current_new_avg: Option<i64>,
    six_month_new_avg: Option<i64>,
) -> MarketRecord {
    let mut record = MarketRecord::new(catalog);
    record.current_new = Some(price_box(current_new_avg));
    record.current_used = Some(PriceBox::default());
    record.six_month_new = Some(price_box(six_month_new_avg));
    record.six_month_used = Some(PriceBox::default());
    record
}

pub fn retiring_in(catalog: &str, days: i64) -> RetirementRecord {
    RetirementRecord {
        catalog_number: catalog.to_string(),
        retiring_soon: true,
        expected_retirement_date: Some(as_of() + chrono::Duration::days(days)),
        ..Default::default()
    }
}

/// Retail 200.00, market 350.00 now / 280.00 over six months, 3 left in
/// stock, retiring in 15 days.
pub fn retiring_set(catalog: &mut FakeCatalog, id: &str, catalog_number: &str) {
    let mut p = product(id, Some(catalog_number));
    p.retail_price = Some(Cents(20000));
    p.stock = Some(3);
    catalog.add_product(p);
    catalog.add_market(complete_market(catalog_number, Some(35000), Some(28000)));
    catalog.add_retirement(retiring_in(catalog_number, 15));
}

pub fn aggregator(repos: Repositories, queue: Option<Arc<dyn RefreshQueue>>) -> DataAggregator {
    DataAggregator::new(repos, queue).with_reference_date(as_of())
}

pub fn scout(repos: Repositories) -> BrickScout {
    let config = Config {
        as_of: Some(as_of()),
        ..Config::default()
    };
    BrickScout::with_repositories(config, repos, None).unwrap()
}
