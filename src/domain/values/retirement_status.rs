use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of a catalog item with respect to manufacturer retirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetirementStatus {
    Active,
    RetiringSoon,
    Retired,
}

impl fmt::Display for RetirementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetirementStatus::Active => write!(f, "active"),
            RetirementStatus::RetiringSoon => write!(f, "retiring_soon"),
            RetirementStatus::Retired => write!(f, "retired"),
        }
    }
}
