pub mod action;
pub mod dimension;
pub mod listing_status;
pub mod money;
pub mod price_box;
pub mod retirement_status;
pub mod trend;
