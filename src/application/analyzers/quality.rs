//! Quality analyzer: star rating, brand authenticity and catalog metadata.

use serde_json::json;

use crate::application::analyzers::scoring::ScoreAssembler;
use crate::domain::analysis::input::{ProductAnalysisInput, QualityData};
use crate::domain::analysis::score::AnalysisScore;
use crate::domain::ports::analyzer::Analyzer;
use crate::domain::values::dimension::Dimension;

pub const WEIGHT_RATING: f64 = 0.50;
pub const WEIGHT_BRAND: f64 = 0.30;
pub const WEIGHT_METADATA: f64 = 0.20;

const DISTRIBUTION_BONUS: f64 = 5.0;

/// Themes that carry a collector premium.
pub const PREMIUM_THEMES: &[&str] = &[
    "star wars",
    "technic",
    "creator expert",
    "icons",
    "ideas",
    "harry potter",
    "architecture",
    "marvel",
    "ultimate collector series",
    "modular buildings",
];

const GENERIC_BRANDS: &[&str] = &["generic", "no brand", "unbranded", "oem", "other", "unknown"];

const FORMULA: &str = "0.50×rating + 0.30×brand + 0.20×metadata";

/// Multiplier applied to the raw rating for thin review counts.
pub fn review_count_factor(review_count: Option<u32>) -> f64 {
    match review_count {
        None => 0.9,
        Some(n) if n < 5 => 0.7,
        Some(n) if n < 20 => 0.85,
        Some(n) if n < 50 => 0.95,
        Some(_) => 1.0,
    }
}

/// A distribution that uses more than one star level and is not almost
/// entirely five-star looks organic.
pub fn is_realistic_distribution(distribution: &[u32; 5]) -> bool {
    let total: u32 = distribution.iter().sum();
    if total == 0 {
        return false;
    }
    let levels_used = distribution.iter().filter(|n| **n > 0).count();
    let five_star_share = distribution[4] as f64 / total as f64;
    levels_used >= 2 && five_star_share < 0.95
}

pub fn is_premium_theme(theme: &str) -> bool {
    let t = theme.trim().to_lowercase();
    PREMIUM_THEMES.iter().any(|p| t.contains(p))
}

/// Exact match with the expected brand scores highest, generic or unknown lowest.
pub fn brand_score(brand: &str, expected: &str) -> (f64, String) {
    let b = brand.trim().to_lowercase();
    let e = expected.trim().to_lowercase();
    if b == e {
        (100.0, format!("Official {expected} product"))
    } else if !e.is_empty() && b.contains(&e) {
        (75.0, format!("Brand '{brand}' references {expected}"))
    } else if b.is_empty() || GENERIC_BRANDS.contains(&b.as_str()) {
        (10.0, "Generic or unknown brand".to_string())
    } else {
        (35.0, format!("Third-party brand '{brand}'"))
    }
}

#[derive(Debug, Clone)]
pub struct QualityAnalyzer {
    expected_brand: String,
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new("LEGO")
    }
}

impl QualityAnalyzer {
    pub fn new(expected_brand: impl Into<String>) -> Self {
        Self {
            expected_brand: expected_brand.into(),
        }
    }

    pub fn score(&self, data: &QualityData) -> Option<AnalysisScore> {
        let mut a = ScoreAssembler::new();
        a.slot("rating", data.rating.is_some());
        a.slot("review_count", data.review_count.is_some());
        a.slot("brand", data.brand.is_some());
        a.slot("theme", data.theme.is_some());
        a.slot("parts_count", data.parts_count.is_some());

        if let Some(rating) = data.rating {
            let base = rating / 5.0 * 100.0;
            let factor = review_count_factor(data.review_count);
            let mut score = base * factor;
            let mut calculation = format!("{rating:.1}/5 → {base:.1} × reviews {factor:.2}");
            let reviews = data
                .review_count
                .map(|n| format!(" from {n} reviews"))
                .unwrap_or_default();
            let mut reason = format!("Rated {rating:.1}/5{reviews}");
            if let Some(dist) = &data.rating_distribution {
                if is_realistic_distribution(dist) {
                    score += DISTRIBUTION_BONUS;
                    calculation
                        .push_str(&format!(" + {DISTRIBUTION_BONUS} realistic distribution"));
                } else if dist.iter().sum::<u32>() >= 10 {
                    reason.push_str(" (uniform rating distribution, possible review manipulation)");
                }
            }
            a.reason(reason.clone());
            a.data_point("rating", rating);
            a.component("rating", WEIGHT_RATING, score, json!(rating), calculation, reason);
        }

        if let Some(brand) = &data.brand {
            let (score, reason) = brand_score(brand, &self.expected_brand);
            a.reason(reason.clone());
            a.component(
                "brand",
                WEIGHT_BRAND,
                score,
                json!(brand),
                format!("brand '{brand}' vs '{}' → {score}", self.expected_brand),
                reason,
            );
        }

        if data.theme.is_some() || data.parts_count.is_some() {
            let mut score = 0.0;
            let mut parts = Vec::new();
            if let Some(theme) = &data.theme {
                score += 50.0;
                if is_premium_theme(theme) {
                    score += 20.0;
                    parts.push(format!("premium theme {theme}"));
                } else {
                    parts.push(format!("theme {theme}"));
                }
            }
            if let Some(count) = data.parts_count {
                score += 30.0;
                parts.push(format!("{count} pieces"));
            }
            let reason = format!("Catalog: {}", parts.join(", "));
            a.reason(reason.clone());
            a.component(
                "metadata",
                WEIGHT_METADATA,
                score,
                json!({ "theme": data.theme, "parts_count": data.parts_count }),
                "theme 50 + parts_count 30 + premium theme 20".to_string(),
                reason,
            );
        }

        a.finish(FORMULA)
    }
}

impl Analyzer for QualityAnalyzer {
    fn name(&self) -> &'static str {
        "quality"
    }

    fn description(&self) -> &'static str {
        "Star rating adjusted for review depth, brand authenticity and catalog metadata completeness"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Quality
    }

    fn analyze(&self, input: &ProductAnalysisInput) -> Option<AnalysisScore> {
        self.score(&input.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_ranking() {
        assert_eq!(brand_score("LEGO", "LEGO").0, 100.0);
        assert_eq!(brand_score("lego ", "LEGO").0, 100.0);
        assert_eq!(brand_score("LEGO Education", "LEGO").0, 75.0);
        assert_eq!(brand_score("Lepin", "LEGO").0, 35.0);
        assert_eq!(brand_score("Generic", "LEGO").0, 10.0);
    }

    #[test]
    fn test_review_count_penalty() {
        assert!(review_count_factor(Some(2)) < review_count_factor(Some(30)));
        assert_eq!(review_count_factor(Some(500)), 1.0);
    }

    #[test]
    fn test_realistic_distribution() {
        assert!(is_realistic_distribution(&[1, 0, 3, 20, 60]));
        assert!(!is_realistic_distribution(&[0, 0, 0, 0, 80]));
        assert!(!is_realistic_distribution(&[0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_premium_theme_match_is_case_insensitive() {
        assert!(is_premium_theme("Star Wars"));
        assert!(is_premium_theme("LEGO Ideas"));
        assert!(!is_premium_theme("City"));
    }

    #[test]
    fn test_metadata_only_still_scores() {
        let data = QualityData {
            theme: Some("Technic".into()),
            parts_count: Some(3696),
            ..Default::default()
        };
        let score = QualityAnalyzer::default().score(&data).unwrap();
        // metadata 100 × 0.20, nothing else contributes
        assert!((score.value - 20.0).abs() < 1e-9);
        assert!((score.confidence - 0.4).abs() < 1e-9);
    }
}
