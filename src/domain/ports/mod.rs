pub mod analyzer;
pub mod market_repository;
pub mod product_repository;
pub mod refresh_queue;
pub mod retirement_repository;
pub mod sentiment_repository;
pub mod strategy;
