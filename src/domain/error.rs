use crate::domain::values::price_box::PriceBoxKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A product whose secondary-market pricing record is missing one or more boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncompleteProduct {
    pub product_id: String,
    pub catalog_number: String,
    pub missing: Vec<PriceBoxKind>,
}

impl fmt::Display for IncompleteProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let boxes: Vec<String> = self.missing.iter().map(|k| k.to_string()).collect();
        write!(
            f,
            "{} ({}): missing {}",
            self.product_id,
            self.catalog_number,
            boxes.join(", ")
        )
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Incomplete secondary-market data: {}", describe_incomplete(.0))]
    IncompleteData(Vec<IncompleteProduct>),

    #[error("Unknown strategy: {name} (available: {})", .available.join(", "))]
    UnknownStrategy {
        name: String,
        available: Vec<String>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

fn describe_incomplete(products: &[IncompleteProduct]) -> String {
    products
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_data_names_every_product_and_box() {
        let err = DomainError::IncompleteData(vec![
            IncompleteProduct {
                product_id: "p1".into(),
                catalog_number: "75192-1".into(),
                missing: vec![PriceBoxKind::CurrentNew, PriceBoxKind::SixMonthUsed],
            },
            IncompleteProduct {
                product_id: "p2".into(),
                catalog_number: "10294-1".into(),
                missing: vec![PriceBoxKind::CurrentUsed],
            },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("p1 (75192-1): missing current_new, six_month_used"));
        assert!(msg.contains("p2 (10294-1): missing current_used"));
    }

    #[test]
    fn test_unknown_strategy_lists_available() {
        let err = DomainError::UnknownStrategy {
            name: "yolo".into(),
            available: vec!["Bargain Hunter".into(), "Quick Flip".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown strategy: yolo (available: Bargain Hunter, Quick Flip)"
        );
    }
}
