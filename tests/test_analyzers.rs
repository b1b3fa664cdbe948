//! Dimension analyzers: null on no input, bounded output, monotonic curves.

use brickscout::application::analyzers::availability::AvailabilityAnalyzer;
use brickscout::application::analyzers::demand::DemandAnalyzer;
use brickscout::application::analyzers::quality::QualityAnalyzer;
use brickscout::application::valuation::retirement_status;
use brickscout::domain::analysis::input::{
    AvailabilityData, CommunitySignals, DemandData, QualityData,
};
use brickscout::domain::entities::sales_statistics::ConditionStatistics;
use brickscout::domain::values::listing_status::ListingStatus;
use brickscout::domain::values::money::Cents;
use brickscout::domain::values::retirement_status::RetirementStatus;
use brickscout::domain::values::trend::TrendDirection;

fn in_bounds(value: f64, confidence: f64) -> bool {
    (0.0..=100.0).contains(&value) && (0.0..=1.0).contains(&confidence)
}

#[test]
fn test_no_inputs_yield_no_opinion() {
    assert!(DemandAnalyzer.score(&DemandData::default()).is_none());
    assert!(AvailabilityAnalyzer
        .score(&AvailabilityData::default(), 2026)
        .is_none());
    assert!(QualityAnalyzer::default()
        .score(&QualityData::default())
        .is_none());
}

#[test]
fn test_spec_shaped_availability_score() {
    let data = AvailabilityData {
        stock: Some(3),
        retiring_soon: Some(true),
        days_until_retirement: Some(15),
        ..Default::default()
    };
    let score = AvailabilityAnalyzer.score(&data, 2026).unwrap();
    // 0.55 × 97.5 + 0.35 × 87.5
    assert!((score.value - 84.25).abs() < 1e-6, "{}", score.value);
    assert!((score.confidence - 2.0 / 3.0).abs() < 1e-9);
    assert!(score.reasoning.contains("CRITICAL WINDOW"));
    let multiplier = score.multiplier().unwrap();
    assert!((0.95..=1.10).contains(&multiplier));
}

#[test]
fn test_availability_urgency_never_rises_with_more_days() {
    let mut prev = f64::INFINITY;
    for days in 10..=400 {
        let data = AvailabilityData {
            days_until_retirement: Some(days),
            retiring_soon: Some(true),
            ..Default::default()
        };
        let score = AvailabilityAnalyzer.score(&data, 2026).unwrap().value;
        assert!(score <= prev, "score rose at {days} days");
        prev = score;
    }
}

#[test]
fn test_retirement_phase_agrees_with_value_calculator() {
    let phase_of = |data: &AvailabilityData| {
        let score = AvailabilityAnalyzer.score(data, 2026).unwrap();
        score.data_points["retirement_phase"].as_str().unwrap().to_string()
    };
    let cases = [
        (
            AvailabilityData {
                year_retired: Some(2027),
                retiring_soon: Some(false),
                ..Default::default()
            },
            "pre_retirement",
            RetirementStatus::RetiringSoon,
        ),
        (
            AvailabilityData {
                year_retired: Some(2024),
                retiring_soon: Some(true),
                days_until_retirement: Some(60),
                ..Default::default()
            },
            "retired",
            RetirementStatus::Retired,
        ),
        (
            AvailabilityData {
                days_until_retirement: Some(-20),
                retiring_soon: Some(true),
                ..Default::default()
            },
            "retired",
            RetirementStatus::Retired,
        ),
        (
            AvailabilityData {
                retiring_soon: Some(false),
                ..Default::default()
            },
            "active",
            RetirementStatus::Active,
        ),
    ];
    for (data, phase, status) in cases {
        assert_eq!(phase_of(&data), phase, "{data:?}");
        assert_eq!(retirement_status(&data, 2026, 3).0, status, "{data:?}");
    }
}

#[test]
fn test_passed_date_never_outranks_retired_year() {
    let passed = AvailabilityData {
        days_until_retirement: Some(-30),
        retiring_soon: Some(true),
        ..Default::default()
    };
    let retired = AvailabilityData {
        year_retired: Some(2024),
        ..Default::default()
    };
    let a = AvailabilityAnalyzer.score(&passed, 2026).unwrap().value;
    let b = AvailabilityAnalyzer.score(&retired, 2026).unwrap().value;
    assert!(a <= b, "{a} > {b}");
}

#[test]
fn test_delisted_beats_active() {
    let score = |status| {
        AvailabilityAnalyzer
            .score(
                &AvailabilityData {
                    listing_status: Some(status),
                    ..Default::default()
                },
                2026,
            )
            .unwrap()
            .value
    };
    assert!(score(ListingStatus::Delisted) > score(ListingStatus::Active));
}

#[test]
fn test_transactions_outweigh_listings() {
    let busy = DemandData {
        transactions: Some(ConditionStatistics {
            total_transactions: 240,
            sales_velocity: Some(2.0),
            recent_30d: Some(25),
            price_trend: Some(TrendDirection::Increasing),
            rsi: Some(60.0),
            volume_trend: Some(TrendDirection::Stable),
            ..Default::default()
        }),
        ..Default::default()
    };
    let listings_only = DemandData {
        current_market_price: Some(Cents(40000)),
        historical_market_price: Some(Cents(30000)),
        retail_price: Some(Cents(20000)),
        current_lots: Some(2),
        ..Default::default()
    };
    let busy = DemandAnalyzer.score(&busy).unwrap();
    let listings_only = DemandAnalyzer.score(&listings_only).unwrap();
    assert!(busy.value > listings_only.value);
    assert!(in_bounds(busy.value, busy.confidence));
    assert!(in_bounds(listings_only.value, listings_only.confidence));
}

#[test]
fn test_legacy_times_sold_ignored_when_transactions_exist() {
    let stats = ConditionStatistics {
        total_transactions: 0,
        ..Default::default()
    };
    let with_legacy = DemandData {
        transactions: Some(stats.clone()),
        legacy_times_sold: Some(500),
        ..Default::default()
    };
    let without_legacy = DemandData {
        transactions: Some(stats),
        ..Default::default()
    };
    assert_eq!(
        DemandAnalyzer.score(&with_legacy).unwrap().value,
        DemandAnalyzer.score(&without_legacy).unwrap().value
    );
}

#[test]
fn test_legacy_fallback_when_no_transactions() {
    let data = DemandData {
        legacy_times_sold: Some(90),
        ..Default::default()
    };
    let score = DemandAnalyzer.score(&data).unwrap();
    assert!(score.value > 0.0);
    assert!(score.reasoning.contains("price guide only"));
}

#[test]
fn test_community_alone_is_a_small_signal() {
    let data = DemandData {
        community: Some(CommunitySignals {
            post_count: 100,
            total_score: 10000,
            average_score: Some(100.0),
            total_comments: 900,
        }),
        ..Default::default()
    };
    let score = DemandAnalyzer.score(&data).unwrap();
    // Community is capped at its 12% weight; nothing renormalizes it up.
    assert!(score.value <= 12.0 + 1e-9);
}

#[test]
fn test_quality_prefers_official_brand_and_many_reviews() {
    let official = QualityData {
        rating: Some(4.7),
        review_count: Some(800),
        rating_distribution: Some([5, 8, 30, 150, 607]),
        brand: Some("LEGO".into()),
        theme: Some("Icons".into()),
        parts_count: Some(2500),
    };
    let knockoff = QualityData {
        rating: Some(4.7),
        review_count: Some(3),
        brand: Some("Generic".into()),
        ..Default::default()
    };
    let analyzer = QualityAnalyzer::default();
    let a = analyzer.score(&official).unwrap();
    let b = analyzer.score(&knockoff).unwrap();
    assert!(a.value > b.value);
    assert_eq!(a.confidence, 1.0);
    assert!(in_bounds(a.value, a.confidence));
}
