use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Retirement timing and catalog metadata for one catalog number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetirementRecord {
    pub catalog_number: String,
    #[serde(default)]
    pub retiring_soon: bool,
    #[serde(default)]
    pub expected_retirement_date: Option<NaiveDate>,
    #[serde(default)]
    pub year_released: Option<i32>,
    /// Authoritative retirement year. Wins over `retiring_soon` whenever set.
    #[serde(default)]
    pub year_retired: Option<i32>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub parts_count: Option<u32>,
}
