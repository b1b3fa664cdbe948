//! Built-in investment strategies and the registry that resolves them by name.

pub mod bargain_hunter;
pub mod investment_focus;
pub mod quick_flip;

use crate::domain::error::DomainError;
use crate::domain::ports::strategy::Strategy;

pub use bargain_hunter::BargainHunter;
pub use investment_focus::InvestmentFocus;
pub use quick_flip::QuickFlip;

/// Name lookup ignores case and treats `-` / `_` as spaces, so
/// `investment-focus` resolves to "Investment Focus".
fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(InvestmentFocus));
        registry.register(Box::new(BargainHunter));
        registry.register(Box::new(QuickFlip));
        registry
    }

    /// Add a strategy, replacing any existing one with the same name.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        let key = normalize(strategy.name());
        self.strategies.retain(|s| normalize(s.name()) != key);
        self.strategies.push(strategy);
    }

    pub fn get(&self, name: &str) -> Result<&dyn Strategy, DomainError> {
        let key = normalize(name);
        self.strategies
            .iter()
            .find(|s| normalize(s.name()) == key)
            .map(|s| s.as_ref())
            .ok_or_else(|| DomainError::UnknownStrategy {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn list(&self) -> impl Iterator<Item = &dyn Strategy> {
        self.strategies.iter().map(|s| s.as_ref())
    }
}
