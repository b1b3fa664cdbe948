pub mod market_record;
pub mod product;
pub mod retirement;
pub mod sales_statistics;
pub mod sentiment;
