use std::collections::HashMap;

use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::domain::entities::sentiment::SentimentRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::sentiment_repository::SentimentRepository;

use super::{lock, placeholders, SharedConnection};

const COLUMNS: &str = "catalog_number, post_count, total_score, average_score, total_comments";

/// Aggregated community discussion per catalog number.
pub struct SqliteSentimentRepo {
    conn: SharedConnection,
}

impl SqliteSentimentRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<SentimentRecord, rusqlite::Error> {
        Ok(SentimentRecord {
            catalog_number: row.get(0)?,
            post_count: row.get(1)?,
            total_score: row.get(2)?,
            average_score: row.get(3)?,
            total_comments: row.get(4)?,
        })
    }

    pub fn upsert(&self, record: &SentimentRecord) -> Result<(), DomainError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            &format!("INSERT OR REPLACE INTO sentiment ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            params![
                record.catalog_number,
                record.post_count,
                record.total_score,
                record.average_score,
                record.total_comments,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save sentiment: {e}")))?;
        Ok(())
    }

    fn load(&self, catalog_number: &str) -> Result<Option<SentimentRecord>, DomainError> {
        let conn = lock(&self.conn)?;
        let found = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM sentiment WHERE catalog_number = ?1"),
                params![catalog_number],
                Self::row_to_record,
            )
            .optional()?;
        Ok(found)
    }

    fn load_many(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, SentimentRecord>, DomainError> {
        if catalog_numbers.is_empty() {
            return Ok(HashMap::new());
        }
        let conn = lock(&self.conn)?;
        let sql = format!(
            "SELECT {COLUMNS} FROM sentiment WHERE catalog_number IN ({})",
            placeholders(catalog_numbers.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(catalog_numbers.iter()), Self::row_to_record)?;
        let mut out = HashMap::new();
        for row in rows {
            let record = row?;
            out.insert(record.catalog_number.clone(), record);
        }
        Ok(out)
    }
}

#[async_trait::async_trait]
impl SentimentRepository for SqliteSentimentRepo {
    async fn find_by_catalog_number(
        &self,
        catalog_number: &str,
    ) -> Result<Option<SentimentRecord>, DomainError> {
        self.load(catalog_number)
    }

    async fn find_by_catalog_numbers(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, SentimentRecord>, DomainError> {
        self.load_many(catalog_numbers)
    }
}
