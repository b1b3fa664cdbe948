use std::collections::HashMap;

use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::domain::entities::market_record::MarketRecord;
use crate::domain::entities::sales_statistics::SalesStatistics;
use crate::domain::error::DomainError;
use crate::domain::ports::market_repository::MarketRepository;

use super::{json_column, lock, placeholders, timestamp_column, to_json, SharedConnection};

const MARKET_COLUMNS: &str =
    "catalog_number, title, current_new, current_used, six_month_new, six_month_used, scraped_at";
const STATS_COLUMNS: &str = "catalog_number, new_stats, used_stats, computed_at";

/// Secondary-market price guides and past-sales statistics.
///
/// A `NULL` pricing box column means that box was never scraped.
pub struct SqliteMarketRepo {
    conn: SharedConnection,
}

impl SqliteMarketRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<MarketRecord, rusqlite::Error> {
        Ok(MarketRecord {
            catalog_number: row.get(0)?,
            title: row.get(1)?,
            current_new: json_column(row, 2)?,
            current_used: json_column(row, 3)?,
            six_month_new: json_column(row, 4)?,
            six_month_used: json_column(row, 5)?,
            scraped_at: timestamp_column(row, 6)?,
        })
    }

    fn row_to_stats(row: &rusqlite::Row) -> Result<SalesStatistics, rusqlite::Error> {
        Ok(SalesStatistics {
            catalog_number: row.get(0)?,
            new: json_column(row, 1)?,
            used: json_column(row, 2)?,
            computed_at: timestamp_column(row, 3)?,
        })
    }

    pub fn upsert_record(&self, record: &MarketRecord) -> Result<(), DomainError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            &format!("INSERT OR REPLACE INTO market_records ({MARKET_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            params![
                record.catalog_number,
                record.title,
                to_json(&record.current_new)?,
                to_json(&record.current_used)?,
                to_json(&record.six_month_new)?,
                to_json(&record.six_month_used)?,
                record.scraped_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save market record: {e}")))?;
        Ok(())
    }

    pub fn upsert_statistics(&self, stats: &SalesStatistics) -> Result<(), DomainError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            &format!("INSERT OR REPLACE INTO sales_statistics ({STATS_COLUMNS}) VALUES (?1, ?2, ?3, ?4)"),
            params![
                stats.catalog_number,
                to_json(&stats.new)?,
                to_json(&stats.used)?,
                stats.computed_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save sales statistics: {e}")))?;
        Ok(())
    }

    fn load_one<T>(
        &self,
        table: &str,
        columns: &str,
        catalog_number: &str,
        map: fn(&rusqlite::Row) -> Result<T, rusqlite::Error>,
    ) -> Result<Option<T>, DomainError> {
        let conn = lock(&self.conn)?;
        let found = conn
            .query_row(
                &format!("SELECT {columns} FROM {table} WHERE catalog_number = ?1"),
                params![catalog_number],
                map,
            )
            .optional()?;
        Ok(found)
    }

    fn load_many<T>(
        &self,
        table: &str,
        columns: &str,
        catalog_numbers: &[String],
        map: fn(&rusqlite::Row) -> Result<T, rusqlite::Error>,
        key: fn(&T) -> String,
    ) -> Result<HashMap<String, T>, DomainError> {
        if catalog_numbers.is_empty() {
            return Ok(HashMap::new());
        }
        let conn = lock(&self.conn)?;
        let sql = format!(
            "SELECT {columns} FROM {table} WHERE catalog_number IN ({})",
            placeholders(catalog_numbers.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(catalog_numbers.iter()), map)?;
        let mut out = HashMap::new();
        for row in rows {
            let item = row?;
            out.insert(key(&item), item);
        }
        Ok(out)
    }
}

#[async_trait::async_trait]
impl MarketRepository for SqliteMarketRepo {
    async fn find_by_catalog_number(
        &self,
        catalog_number: &str,
    ) -> Result<Option<MarketRecord>, DomainError> {
        self.load_one("market_records", MARKET_COLUMNS, catalog_number, Self::row_to_record)
    }

    async fn find_by_catalog_numbers(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, MarketRecord>, DomainError> {
        self.load_many(
            "market_records",
            MARKET_COLUMNS,
            catalog_numbers,
            Self::row_to_record,
            |r| r.catalog_number.clone(),
        )
    }

    async fn sales_statistics(
        &self,
        catalog_number: &str,
    ) -> Result<Option<SalesStatistics>, DomainError> {
        self.load_one("sales_statistics", STATS_COLUMNS, catalog_number, Self::row_to_stats)
    }

    async fn sales_statistics_batch(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, SalesStatistics>, DomainError> {
        self.load_many(
            "sales_statistics",
            STATS_COLUMNS,
            catalog_numbers,
            Self::row_to_stats,
            |s| s.catalog_number.clone(),
        )
    }
}
