use std::collections::HashMap;

use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::domain::entities::retirement::RetirementRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::retirement_repository::RetirementRepository;

use super::{date_column, lock, placeholders, SharedConnection};

const COLUMNS: &str =
    "catalog_number, retiring_soon, expected_retirement_date, year_released, year_retired, theme, parts_count";

pub struct SqliteRetirementRepo {
    conn: SharedConnection,
}

impl SqliteRetirementRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<RetirementRecord, rusqlite::Error> {
        Ok(RetirementRecord {
            catalog_number: row.get(0)?,
            retiring_soon: row.get(1)?,
            expected_retirement_date: date_column(row, 2)?,
            year_released: row.get(3)?,
            year_retired: row.get(4)?,
            theme: row.get(5)?,
            parts_count: row.get(6)?,
        })
    }

    pub fn upsert(&self, record: &RetirementRecord) -> Result<(), DomainError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            &format!("INSERT OR REPLACE INTO retirement ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            params![
                record.catalog_number,
                record.retiring_soon,
                record
                    .expected_retirement_date
                    .map(|d| d.format("%Y-%m-%d").to_string()),
                record.year_released,
                record.year_retired,
                record.theme,
                record.parts_count,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save retirement record: {e}")))?;
        Ok(())
    }

    fn load(&self, catalog_number: &str) -> Result<Option<RetirementRecord>, DomainError> {
        let conn = lock(&self.conn)?;
        let found = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM retirement WHERE catalog_number = ?1"),
                params![catalog_number],
                Self::row_to_record,
            )
            .optional()?;
        Ok(found)
    }

    fn load_many(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, RetirementRecord>, DomainError> {
        if catalog_numbers.is_empty() {
            return Ok(HashMap::new());
        }
        let conn = lock(&self.conn)?;
        let sql = format!(
            "SELECT {COLUMNS} FROM retirement WHERE catalog_number IN ({})",
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
impl RetirementRepository for SqliteRetirementRepo {
    async fn find_by_catalog_number(
        &self,
        catalog_number: &str,
    ) -> Result<Option<RetirementRecord>, DomainError> {
        self.load(catalog_number)
    }

    async fn find_by_catalog_numbers(
        &self,
        catalog_numbers: &[String],
    ) -> Result<HashMap<String, RetirementRecord>, DomainError> {
        self.load_many(catalog_numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::open_connection;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_expected_date_round_trips_as_date() {
        let repo = SqliteRetirementRepo::new(open_connection(":memory:").unwrap());
        let record = RetirementRecord {
            catalog_number: "21318-1".into(),
            retiring_soon: true,
            expected_retirement_date: NaiveDate::from_ymd_opt(2026, 12, 31),
            year_released: Some(2019),
            ..Default::default()
        };
        repo.upsert(&record).unwrap();
        assert_eq!(
            repo.find_by_catalog_number("21318-1").await.unwrap(),
            Some(record)
        );
    }
}
