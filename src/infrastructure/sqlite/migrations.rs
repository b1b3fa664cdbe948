use rusqlite::Connection;

use crate::domain::error::DomainError;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS products (
            product_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            catalog_number TEXT,
            brand TEXT,
            price_cents INTEGER,
            retail_price_cents INTEGER,
            units_sold INTEGER,
            stock INTEGER,
            listing_status TEXT,
            rating REAL,
            review_count INTEGER,
            rating_distribution TEXT
        );

        CREATE TABLE IF NOT EXISTS market_records (
            catalog_number TEXT PRIMARY KEY,
            title TEXT,
            current_new TEXT,
            current_used TEXT,
            six_month_new TEXT,
            six_month_used TEXT,
            scraped_at TEXT
        );

        CREATE TABLE IF NOT EXISTS sales_statistics (
            catalog_number TEXT PRIMARY KEY,
            new_stats TEXT,
            used_stats TEXT,
            computed_at TEXT
        );

        CREATE TABLE IF NOT EXISTS sentiment (
            catalog_number TEXT PRIMARY KEY,
            post_count INTEGER NOT NULL DEFAULT 0,
            total_score INTEGER NOT NULL DEFAULT 0,
            average_score REAL,
            total_comments INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS retirement (
            catalog_number TEXT PRIMARY KEY,
            retiring_soon INTEGER NOT NULL DEFAULT 0,
            expected_retirement_date TEXT,
            year_released INTEGER,
            year_retired INTEGER,
            theme TEXT,
            parts_count INTEGER
        );

        CREATE TABLE IF NOT EXISTS refresh_requests (
            catalog_number TEXT PRIMARY KEY,
            requested_at TEXT NOT NULL,
            request_count INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_products_catalog ON products(catalog_number);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
