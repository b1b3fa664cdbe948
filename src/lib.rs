pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use crate::application::aggregation::{DataAggregator, Repositories};
use crate::application::analyzers::default_analyzers;
use crate::application::recommend::{ComponentInfo, RecommendationEngine};
use crate::application::strategies::StrategyRegistry;
use crate::application::valuation::{ValueCalculator, ValueConfig};
use crate::config::Config;
use crate::domain::analysis::recommendation::{BatchAnalysis, ProductRecommendation};
use crate::domain::error::DomainError;
use crate::domain::ports::refresh_queue::RefreshQueue;
use crate::infrastructure::sqlite::import::{import_bundle, ImportSummary, SeedBundle};
use crate::infrastructure::sqlite::refresh_queue::{RefreshRequest, SqliteRefreshQueue};
use crate::infrastructure::sqlite::{open_connection, SqliteRepositories};

pub struct BrickScout {
    engine: RecommendationEngine,
    store: Option<SqliteRepositories>,
    refresh_queue: Option<Arc<SqliteRefreshQueue>>,
}

impl BrickScout {
    /// Open the SQLite database named in `config` and wire every adapter to it.
    pub fn new(config: Config) -> Result<Self, DomainError> {
        config.validate()?;
        let conn = open_connection(&config.db_path)?;
        let store = SqliteRepositories::from_connection(conn.clone());
        let queue = Arc::new(SqliteRefreshQueue::new(conn));
        let queue_port: Arc<dyn RefreshQueue> = queue.clone();
        let engine = build_engine(&config, store.as_ports(), Some(queue_port));
        Ok(Self {
            engine,
            store: Some(store),
            refresh_queue: Some(queue),
        })
    }

    /// Use caller-supplied repositories. `refresh_queue` is optional.
    pub fn with_repositories(
        config: Config,
        repos: Repositories,
        refresh_queue: Option<Arc<dyn RefreshQueue>>,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self {
            engine: build_engine(&config, repos, refresh_queue),
            store: None,
            refresh_queue: None,
        })
    }

    pub async fn analyze_product(
        &self,
        product_id: &str,
        strategy: Option<&str>,
    ) -> Result<ProductRecommendation, DomainError> {
        self.engine.analyze_product(product_id, strategy).await
    }

    pub async fn analyze_products(
        &self,
        product_ids: &[String],
        strategy: Option<&str>,
    ) -> Result<BatchAnalysis, DomainError> {
        self.engine.analyze_products(product_ids, strategy).await
    }

    pub fn available_strategies(&self) -> Vec<ComponentInfo> {
        self.engine.available_strategies()
    }

    pub fn analyzer_info(&self) -> Vec<ComponentInfo> {
        self.engine.analyzer_info()
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn import(&self, bundle: &SeedBundle) -> Result<ImportSummary, DomainError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| {
                DomainError::InvalidInput("import requires the SQLite store".to_string())
            })?;
        import_bundle(store, bundle)
    }

    pub fn pending_refreshes(&self) -> Result<Vec<RefreshRequest>, DomainError> {
        match &self.refresh_queue {
            Some(queue) => queue.pending(),
            None => Ok(Vec::new()),
        }
    }
}

fn build_engine(
    config: &Config,
    repos: Repositories,
    refresh_queue: Option<Arc<dyn RefreshQueue>>,
) -> RecommendationEngine {
    let mut aggregator = DataAggregator::new(repos, refresh_queue);
    if let Some(date) = config.as_of {
        aggregator = aggregator.with_reference_date(date);
    }
    let value_calculator = ValueCalculator::new(ValueConfig {
        retirement_age_years: config.retirement_age_years,
        ..ValueConfig::default()
    });
    RecommendationEngine::new(
        aggregator,
        default_analyzers(&config.expected_brand),
        value_calculator,
        StrategyRegistry::with_defaults(),
        config.default_strategy.clone(),
    )
}
