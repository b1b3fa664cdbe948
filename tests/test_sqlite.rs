//! The SQLite-backed facade: import a seed bundle, then analyze from disk.

use brickscout::config::Config;
use brickscout::domain::error::DomainError;
use brickscout::infrastructure::sqlite::import::SeedBundle;
use brickscout::BrickScout;
use chrono::NaiveDate;

const BUNDLE: &str = r#"{
  "products": [
    {"product_id": "falcon", "name": "Millennium Falcon", "catalog_number": "75192-1",
     "brand": "LEGO", "retail_price": 84999, "stock": 2, "listing_status": "active",
     "rating": 4.8, "review_count": 1200, "rating_distribution": [10, 12, 40, 180, 958]},
    {"product_id": "unscraped", "name": "Mystery Box", "catalog_number": "00000-1"}
  ],
  "market_records": [
    {"catalog_number": "75192-1",
     "current_new": {"times_sold": 6, "total_lots": 14, "avg_price": 98000},
     "current_used": {"avg_price": 70000},
     "six_month_new": {"times_sold": 44, "avg_price": 91000},
     "six_month_used": {}}
  ],
  "sales_statistics": [
    {"catalog_number": "75192-1",
     "new": {"total_transactions": 44, "sales_velocity": 0.25, "recent_30d": 8,
             "volatility": 0.12, "price_trend": "increasing", "rsi": 64.0,
             "volume_trend": "stable"}}
  ],
  "sentiment": [
    {"catalog_number": "75192-1", "post_count": 18, "total_score": 420, "total_comments": 260}
  ],
  "retirement": [
    {"catalog_number": "75192-1", "retiring_soon": true, "expected_retirement_date": "2026-08-01",
     "year_released": 2017, "theme": "Star Wars", "parts_count": 7541}
  ]
}"#;

fn open(dir: &tempfile::TempDir) -> BrickScout {
    let config = Config {
        db_path: dir.path().join("scout.db").to_string_lossy().into_owned(),
        as_of: NaiveDate::from_ymd_opt(2026, 6, 1),
        ..Config::default()
    };
    BrickScout::new(config).unwrap()
}

#[tokio::test]
async fn test_import_then_analyze_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let scout = open(&dir);
    let bundle: SeedBundle = serde_json::from_str(BUNDLE).unwrap();
    let summary = scout.import(&bundle).unwrap();
    assert_eq!(summary.products, 2);
    assert_eq!(summary.market_records, 1);

    let rec = scout.analyze_product("falcon", Some("Investment Focus")).await.unwrap();
    assert!(rec.dimensions.demand.is_some());
    assert!(rec.dimensions.availability.is_some());
    assert!(rec.dimensions.quality.is_some());
    let price = rec.recommended_buy_price.expect("retail anchor available");
    assert!(price.price.value() > 0);

    // Data survives reopening the file.
    drop(scout);
    let reopened = open(&dir);
    assert!(reopened.analyze_product("falcon", None).await.is_ok());
}

#[tokio::test]
async fn test_unscraped_product_is_queued_for_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let scout = open(&dir);
    scout
        .import(&serde_json::from_str::<SeedBundle>(BUNDLE).unwrap())
        .unwrap();

    let err = scout.analyze_product("unscraped", None).await.unwrap_err();
    assert!(matches!(err, DomainError::IncompleteData(_)));

    let pending = scout.pending_refreshes().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].catalog_number, "00000-1");
}

#[tokio::test]
async fn test_in_memory_database() {
    let config = Config {
        db_path: ":memory:".into(),
        ..Config::default()
    };
    let scout = BrickScout::new(config).unwrap();
    assert!(matches!(
        scout.analyze_product("nothing", None).await,
        Err(DomainError::NotFound(_))
    ));
}
