use chrono::Utc;
use rusqlite::params;
use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::ports::refresh_queue::RefreshQueue;

use super::{lock, SharedConnection};

/// A catalog number waiting for its price guide to be scraped again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshRequest {
    pub catalog_number: String,
    pub requested_at: String,
    pub request_count: u32,
}

/// Persists refresh requests for an external scraper to pick up.
pub struct SqliteRefreshQueue {
    conn: SharedConnection,
}

impl SqliteRefreshQueue {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn insert(&self, catalog_numbers: &[String]) -> Result<(), DomainError> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;
        let now = Utc::now().to_rfc3339();
        for catalog_number in catalog_numbers {
            tx.execute(
                "INSERT INTO refresh_requests (catalog_number, requested_at, request_count) VALUES (?1, ?2, 1)
                 ON CONFLICT(catalog_number) DO UPDATE SET request_count = request_count + 1",
                params![catalog_number, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Pending requests, oldest first.
    pub fn pending(&self) -> Result<Vec<RefreshRequest>, DomainError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT catalog_number, requested_at, request_count FROM refresh_requests ORDER BY requested_at, catalog_number",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RefreshRequest {
                catalog_number: row.get(0)?,
                requested_at: row.get(1)?,
                request_count: row.get(2)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

#[async_trait::async_trait]
impl RefreshQueue for SqliteRefreshQueue {
    async fn enqueue(&self, catalog_numbers: &[String]) -> Result<(), DomainError> {
        self.insert(catalog_numbers)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
