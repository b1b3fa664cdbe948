//! Runtime configuration, read from `BRICKSCOUT_*` environment variables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::strategies::StrategyRegistry;
use crate::domain::error::DomainError;

pub const DEFAULT_DB_PATH: &str = "./brickscout.db";
pub const DEFAULT_STRATEGY: &str = "Investment Focus";
pub const DEFAULT_BRAND: &str = "LEGO";
pub const DEFAULT_RETIREMENT_AGE_YEARS: i32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file, or `:memory:`.
    pub db_path: String,

    /// Strategy used when a request does not name one.
    pub default_strategy: String,

    /// Brand the quality analyzer treats as authentic.
    pub expected_brand: String,

    /// Years after release at which a set with no retirement data is
    /// assumed retired.
    pub retirement_age_years: i32,

    /// Reference date for retirement math. `None` means today (UTC).
    pub as_of: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            default_strategy: DEFAULT_STRATEGY.to_string(),
            expected_brand: DEFAULT_BRAND.to_string(),
            retirement_age_years: DEFAULT_RETIREMENT_AGE_YEARS,
            as_of: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values keep the
    /// default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup("BRICKSCOUT_DB").filter(|v| !v.trim().is_empty()) {
            config.db_path = path;
        }
        if let Some(strategy) = lookup("BRICKSCOUT_STRATEGY").filter(|v| !v.trim().is_empty()) {
            config.default_strategy = strategy;
        }
        if let Some(brand) = lookup("BRICKSCOUT_BRAND").filter(|v| !v.trim().is_empty()) {
            config.expected_brand = brand;
        }
        if let Some(raw) = lookup("BRICKSCOUT_RETIREMENT_AGE") {
            match raw.trim().parse::<i32>() {
                Ok(years) => config.retirement_age_years = years,
                Err(_) => warn!(value = %raw, "ignoring invalid BRICKSCOUT_RETIREMENT_AGE"),
            }
        }
        if let Some(raw) = lookup("BRICKSCOUT_AS_OF") {
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => config.as_of = Some(date),
                Err(_) => {
                    warn!(value = %raw, "ignoring invalid BRICKSCOUT_AS_OF, expected YYYY-MM-DD")
                }
            }
        }
        config
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        StrategyRegistry::with_defaults().get(&self.default_strategy)?;
        if self.retirement_age_years <= 0 {
            return Err(DomainError::InvalidInput(
                "retirement age must be greater than 0".to_string(),
            ));
        }
        if self.expected_brand.trim().is_empty() {
            return Err(DomainError::InvalidInput("expected brand must not be empty".to_string()));
        }
        Ok(())
    }
}
