//! End-to-end recommendation flow over fake repositories.

mod common;

use brickscout::domain::error::DomainError;
use brickscout::domain::values::action::{Action, Urgency};
use common::*;

#[tokio::test]
async fn test_retiring_set_under_investment_focus_is_urgent_buy() {
    let mut catalog = FakeCatalog::default();
    retiring_set(&mut catalog, "falcon", "75192-1");
    let (_, repos) = catalog.into_repositories();
    let scout = scout(repos);

    let rec = scout
        .analyze_product("falcon", Some("Investment Focus"))
        .await
        .unwrap();
    assert!(
        matches!(rec.action, Action::Buy | Action::StrongBuy),
        "got {:?} at {}",
        rec.action,
        rec.overall.value
    );
    assert_eq!(rec.urgency, Urgency::Urgent);
    assert_eq!(rec.strategy, "Investment Focus");
    assert!(rec.dimensions.quality.is_none());
    assert!(rec.recommended_buy_price.is_some());
    assert_eq!(
        rec.time_horizon.as_deref(),
        Some("1-3 years (pre-retirement accumulation)")
    );
}

#[tokio::test]
async fn test_default_strategy_applies_when_none_given() {
    let mut catalog = FakeCatalog::default();
    retiring_set(&mut catalog, "falcon", "75192-1");
    let (_, repos) = catalog.into_repositories();

    let rec = scout(repos).analyze_product("falcon", None).await.unwrap();
    assert_eq!(rec.strategy, "Investment Focus");
}

#[tokio::test]
async fn test_unknown_strategy_fails_before_any_io() {
    let mut catalog = FakeCatalog::default();
    retiring_set(&mut catalog, "falcon", "75192-1");
    let (catalog, repos) = catalog.into_repositories();

    let err = scout(repos)
        .analyze_product("falcon", Some("Moonshot"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UnknownStrategy { .. }));
    assert_eq!(catalog.log.total(), 0);
}

#[tokio::test]
async fn test_rejection_reason_lands_in_risks_verbatim() {
    let mut catalog = FakeCatalog::default();
    let mut p = product("bare", Some("9-1"));
    p.stock = Some(40);
    catalog.add_product(p);
    catalog.add_market(complete_market("9-1", None, None));
    let (_, repos) = catalog.into_repositories();

    let rec = scout(repos).analyze_product("bare", Some("quick flip")).await.unwrap();
    assert!(rec.recommended_buy_price.is_none());
    let reason = "No retail or secondary-market price available to anchor valuation";
    assert!(rec.risks.iter().any(|r| r == reason), "{:?}", rec.risks);
    assert!(rec.overall.reasoning.contains(reason));
}

#[tokio::test]
async fn test_batch_isolates_scoring_failures() {
    let mut catalog = FakeCatalog::default();
    retiring_set(&mut catalog, "a", "1-1");
    retiring_set(&mut catalog, "b", "2-1");
    catalog.products.get_mut("b").unwrap().rating = Some(7.5);
    let (catalog, repos) = catalog.into_repositories();

    let batch = scout(repos)
        .analyze_products(&["a".to_string(), "b".to_string()], None)
        .await
        .unwrap();
    assert_eq!(batch.recommendations.len(), 1);
    assert!(batch.recommendations.contains_key("a"));
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].product_id, "b");
    assert!(batch.failures[0].error.contains("rating"));
    assert_eq!(catalog.log.calls("market.find_by_catalog_numbers"), vec![2]);
}

#[tokio::test]
async fn test_batch_with_incomplete_member_fails_before_scoring() {
    let mut catalog = FakeCatalog::default();
    retiring_set(&mut catalog, "a", "1-1");
    catalog.add_product(product("p", Some("2-1")));
    let (_, repos) = catalog.into_repositories();

    let err = scout(repos)
        .analyze_products(&["a".to_string(), "p".to_string()], None)
        .await
        .unwrap_err();
    match err {
        DomainError::IncompleteData(incomplete) => {
            assert_eq!(incomplete.len(), 1);
            assert_eq!(incomplete[0].product_id, "p");
        }
        other => panic!("expected IncompleteData, got {other:?}"),
    }
}

#[tokio::test]
async fn test_listings_report_every_component() {
    let (_, repos) = FakeCatalog::default().into_repositories();
    let scout = scout(repos);
    let strategies: Vec<String> = scout
        .available_strategies()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(strategies, vec!["Investment Focus", "Bargain Hunter", "Quick Flip"]);
    let analyzers: Vec<String> = scout.analyzer_info().into_iter().map(|a| a.name).collect();
    assert_eq!(analyzers, vec!["demand", "availability", "quality"]);
}
