//! SQLite adapters for the repository ports.
//!
//! All adapters share one connection so `:memory:` databases work.

pub mod import;
pub mod market_repo;
pub mod migrations;
pub mod product_repo;
pub mod refresh_queue;
pub mod retirement_repo;
pub mod sentiment_repo;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::application::aggregation::Repositories;
use crate::domain::error::DomainError;

use self::market_repo::SqliteMarketRepo;
use self::migrations::run_migrations;
use self::product_repo::SqliteProductRepo;
use self::retirement_repo::SqliteRetirementRepo;
use self::sentiment_repo::SqliteSentimentRepo;

pub type SharedConnection = Arc<Mutex<Connection>>;

pub fn open_connection(db_path: &str) -> Result<SharedConnection, DomainError> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    if db_path != ":memory:" {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
    }
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub(crate) fn lock(conn: &SharedConnection) -> Result<MutexGuard<'_, Connection>, DomainError> {
    conn.lock().map_err(|e| DomainError::Database(e.to_string()))
}

/// `?1, ?2, ..., ?n` for an `IN (...)` clause.
pub(crate) fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

pub(crate) fn json_column<T: DeserializeOwned>(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| serde_json::from_str(&s))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn to_json<T: Serialize>(value: &Option<T>) -> Result<Option<String>, DomainError> {
    value.as_ref().map(serde_json::to_string).transpose().map_err(DomainError::from)
}

pub(crate) fn date_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn timestamp_column(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

/// Every SQLite adapter over one shared connection.
#[derive(Clone)]
pub struct SqliteRepositories {
    pub products: Arc<SqliteProductRepo>,
    pub market: Arc<SqliteMarketRepo>,
    pub sentiment: Arc<SqliteSentimentRepo>,
    pub retirement: Arc<SqliteRetirementRepo>,
}

impl SqliteRepositories {
    pub fn open(db_path: &str) -> Result<Self, DomainError> {
        Ok(Self::from_connection(open_connection(db_path)?))
    }

    pub fn from_connection(conn: SharedConnection) -> Self {
        Self {
            products: Arc::new(SqliteProductRepo::new(conn.clone())),
            market: Arc::new(SqliteMarketRepo::new(conn.clone())),
            sentiment: Arc::new(SqliteSentimentRepo::new(conn.clone())),
            retirement: Arc::new(SqliteRetirementRepo::new(conn)),
        }
    }

    pub fn as_ports(&self) -> Repositories {
        Repositories {
            products: self.products.clone(),
            market: self.market.clone(),
            sentiment: self.sentiment.clone(),
            retirement: self.retirement.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(3), "?1, ?2, ?3");
        assert_eq!(placeholders(1), "?1");
    }

    #[test]
    fn test_memory_database_migrates() {
        let conn = open_connection(":memory:").unwrap();
        let guard = lock(&conn).unwrap();
        let count: i64 = guard
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('products', 'market_records', 'sales_statistics', 'sentiment', 'retirement', 'refresh_requests')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 6);
    }
}
