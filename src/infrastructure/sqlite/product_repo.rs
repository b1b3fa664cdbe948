use rusqlite::{params, params_from_iter, OptionalExtension};
use tracing::warn;

use crate::domain::entities::product::Product;
use crate::domain::error::DomainError;
use crate::domain::ports::product_repository::ProductRepository;
use crate::domain::values::listing_status::ListingStatus;
use crate::domain::values::money::Cents;

use super::{json_column, lock, placeholders, to_json, SharedConnection};

const COLUMNS: &str = "product_id, name, catalog_number, brand, price_cents, retail_price_cents, units_sold, stock, listing_status, rating, review_count, rating_distribution";

pub struct SqliteProductRepo {
    conn: SharedConnection,
}

impl SqliteProductRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_product(row: &rusqlite::Row) -> Result<Product, rusqlite::Error> {
        let status: Option<String> = row.get(8)?;
        let units_sold: Option<i64> = row.get(6)?;
        let stock: Option<i64> = row.get(7)?;
        Ok(Product {
            product_id: row.get(0)?,
            name: row.get(1)?,
            catalog_number: row.get(2)?,
            brand: row.get(3)?,
            price: row.get::<_, Option<i64>>(4)?.map(Cents),
            retail_price: row.get::<_, Option<i64>>(5)?.map(Cents),
            units_sold: units_sold.and_then(|n| u64::try_from(n).ok()),
            stock: stock.and_then(|n| u64::try_from(n).ok()),
            listing_status: status.and_then(|s| match s.parse::<ListingStatus>() {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!(value = %s, error = %e, "ignoring unknown listing status");
                    None
                }
            }),
            rating: row.get(9)?,
            review_count: row.get(10)?,
            rating_distribution: json_column(row, 11)?,
        })
    }

    pub fn upsert(&self, product: &Product) -> Result<(), DomainError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO products ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
            ),
            params![
                product.product_id,
                product.name,
                product.catalog_number,
                product.brand,
                product.price.map(|c| c.value()),
                product.retail_price.map(|c| c.value()),
                product.units_sold.map(|n| n as i64),
                product.stock.map(|n| n as i64),
                product.listing_status.map(|s| s.to_string()),
                product.rating,
                product.review_count,
                to_json(&product.rating_distribution)?,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save product: {e}")))?;
        Ok(())
    }

    fn load(&self, product_id: &str) -> Result<Option<Product>, DomainError> {
        let conn = lock(&self.conn)?;
        let product = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM products WHERE product_id = ?1"),
                params![product_id],
                Self::row_to_product,
            )
            .optional()?;
        Ok(product)
    }

    fn load_many(&self, product_ids: &[String]) -> Result<Vec<Product>, DomainError> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = lock(&self.conn)?;
        let sql = format!(
            "SELECT {COLUMNS} FROM products WHERE product_id IN ({})",
            placeholders(product_ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(product_ids.iter()), Self::row_to_product)?;
        let mut products = Vec::new();
        for row in rows {
            products.push(row?);
        }
        Ok(products)
    }
}

#[async_trait::async_trait]
impl ProductRepository for SqliteProductRepo {
    async fn find_by_id(&self, product_id: &str) -> Result<Option<Product>, DomainError> {
        self.load(product_id)
    }

    async fn find_by_ids(&self, product_ids: &[String]) -> Result<Vec<Product>, DomainError> {
        self.load_many(product_ids)
    }
}
