use crate::domain::values::listing_status::ListingStatus;
use crate::domain::values::money::Cents;
use serde::{Deserialize, Serialize};

/// A retail product listing as the product repository stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    /// Manufacturer set number with variant suffix (e.g. "75192-1").
    /// Every related lookup is keyed on it.
    #[serde(default)]
    pub catalog_number: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    /// Current listing price on the retail platform.
    #[serde(default)]
    pub price: Option<Cents>,
    /// Manufacturer's original retail price.
    #[serde(default)]
    pub retail_price: Option<Cents>,
    #[serde(default)]
    pub units_sold: Option<u64>,
    #[serde(default)]
    pub stock: Option<u64>,
    #[serde(default)]
    pub listing_status: Option<ListingStatus>,
    /// Star rating on a 0–5 scale.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Review counts for 1..=5 stars, index 0 holding the 1-star count.
    #[serde(default)]
    pub rating_distribution: Option<[u32; 5]>,
}

impl Product {
    pub fn new(product_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            catalog_number: None,
            brand: None,
            price: None,
            retail_price: None,
            units_sold: None,
            stock: None,
            listing_status: None,
            rating: None,
            review_count: None,
            rating_distribution: None,
        }
    }
}
