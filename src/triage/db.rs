// interaction log - one sqlite table, append only

use crate::Error;
use serde::Serialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

/// One persisted `/predict` interaction.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SymptomRecord {
    pub id: i64,
    pub symptom: String,
    pub department: String,
    pub risk: String,
    pub timestamp: String,
}

// a row before the store has given it an id
pub struct NewRecord<'a> {
    pub symptom: &'a str,
    pub department: &'a str,
    pub risk: &'a str,
    pub timestamp: String,
}

impl Db {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;

        Ok(db)
    }

    // safe to run on every startup
    pub async fn init_schema(&self) -> Result<(), Error> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS patient_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                symptom TEXT,
                department TEXT,
                risk TEXT,
                timestamp TEXT
            )"#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn append(&self, record: &NewRecord<'_>) -> Result<i64, Error> {
        let result = sqlx::query(
            "INSERT INTO patient_logs (symptom, department, risk, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(record.symptom)
        .bind(record.department)
        .bind(record.risk)
        .bind(&record.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM patient_logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // newest first
    pub async fn recent(&self, limit: u32) -> Result<Vec<SymptomRecord>, Error> {
        let rows: Vec<(i64, Option<String>, Option<String>, Option<String>, Option<String>)> =
            sqlx::query_as(
                r#"SELECT id, symptom, department, risk, timestamp
                   FROM patient_logs
                   ORDER BY id DESC
                   LIMIT ?"#,
            )
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, symptom, department, risk, timestamp)| SymptomRecord {
                id,
                symptom: symptom.unwrap_or_default(),
                department: department.unwrap_or_default(),
                risk: risk.unwrap_or_default(),
                timestamp: timestamp.unwrap_or_default(),
            })
            .collect())
    }
}

// local time with microseconds, e.g. 2026-10-16 09:41:07.123456
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string()
}
