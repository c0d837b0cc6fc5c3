//! libSQL backend — async `RegistrationStore` implementation.
//!
//! Supports local file and in-memory databases. Timestamps are stored as
//! RFC 3339 text columns.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{params, Connection, Database};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::intake::Stage;
use crate::store::migrations;
use crate::store::traits::{RegistrationField, RegistrationRecord, RegistrationStore};

const RECORD_COLUMNS: &str =
    "participant_id, full_name, birthday, position, experience, stage, created_at, updated_at";

/// libSQL registration store.
///
/// Holds a single connection reused for all operations;
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<Database>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Open(format!("Failed to create database directory: {e}")))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Open(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Open(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        info!(path = %path.display(), "Registration store opened");
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StoreError::Open(format!("Failed to create in-memory database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Open(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl RegistrationStore for LibSqlStore {
    async fn get(&self, participant_id: &str) -> Result<Option<RegistrationRecord>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {RECORD_COLUMNS} FROM registrations WHERE participant_id = ?1"),
                params![participant_id],
            )
            .await
            .map_err(|e| StoreError::Query(format!("get: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let record =
                    row_to_record(&row).map_err(|e| StoreError::Query(format!("row parse: {e}")))?;
                Ok(Some(record))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Query(format!("get: {e}"))),
        }
    }

    async fn create(&self, participant_id: &str, stage: Stage) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT OR IGNORE INTO registrations (participant_id, stage, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)",
                params![participant_id, stage.as_str(), now],
            )
            .await
            .map_err(|e| StoreError::Query(format!("create: {e}")))?;

        debug!(participant = participant_id, stage = %stage, "Registration record created");
        Ok(())
    }

    async fn set_field(
        &self,
        participant_id: &str,
        field: RegistrationField,
        value: &str,
        stage: Stage,
    ) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        // Column names come from the RegistrationField enum, never from input.
        let sql = format!(
            "UPDATE registrations SET {} = ?1, stage = ?2, updated_at = ?3 WHERE participant_id = ?4",
            field.column()
        );
        self.conn()
            .execute(&sql, params![value, stage.as_str(), now, participant_id])
            .await
            .map_err(|e| StoreError::Query(format!("set_field({field}): {e}")))?;

        debug!(
            participant = participant_id,
            field = %field,
            stage = %stage,
            "Registration field persisted"
        );
        Ok(())
    }
}

/// Map a libsql row to a RegistrationRecord.
fn row_to_record(row: &libsql::Row) -> Result<RegistrationRecord, libsql::Error> {
    let stage_str: String = row.get(5)?;
    let created_str: String = row.get(6)?;
    let updated_str: String = row.get(7)?;

    Ok(RegistrationRecord {
        participant_id: row.get(0)?,
        full_name: row.get(1).ok(),
        birthday: row.get(2).ok(),
        position: row.get(3).ok(),
        experience: row.get(4).ok(),
        stage: stage_str.parse().unwrap_or(Stage::Start),
        created_at: parse_datetime(&created_str),
        updated_at: parse_datetime(&updated_str),
    })
}

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> LibSqlStore {
        LibSqlStore::new_memory().await.unwrap()
    }

    #[tokio::test]
    async fn get_missing_record_is_none() {
        let store = test_store().await;
        assert!(store.get("42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_and_get() {
        let store = test_store().await;
        store.create("42", Stage::AwaitingFullname).await.unwrap();

        let record = store.get("42").await.unwrap().unwrap();
        assert_eq!(record.participant_id, "42");
        assert_eq!(record.stage, Stage::AwaitingFullname);
        assert!(record.full_name.is_none());
        assert!(record.experience.is_none());
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let store = test_store().await;
        store.create("42", Stage::AwaitingFullname).await.unwrap();
        store
            .set_field("42", RegistrationField::FullName, "Иванов Иван", Stage::AwaitingBirthday)
            .await
            .unwrap();

        // A second create must not reset the record.
        store.create("42", Stage::AwaitingFullname).await.unwrap();
        let record = store.get("42").await.unwrap().unwrap();
        assert_eq!(record.full_name.as_deref(), Some("Иванов Иван"));
        assert_eq!(record.stage, Stage::AwaitingBirthday);
    }

    #[tokio::test]
    async fn set_field_walks_all_columns() {
        let store = test_store().await;
        store.create("7", Stage::AwaitingFullname).await.unwrap();

        store
            .set_field("7", RegistrationField::FullName, "Петрова Анна", Stage::AwaitingBirthday)
            .await
            .unwrap();
        store
            .set_field("7", RegistrationField::Birthday, "12.05.1990", Stage::AwaitingPosition)
            .await
            .unwrap();
        store
            .set_field("7", RegistrationField::Position, "менеджер", Stage::AwaitingExperience)
            .await
            .unwrap();
        store
            .set_field("7", RegistrationField::Experience, "2 года", Stage::Complete)
            .await
            .unwrap();

        let record = store.get("7").await.unwrap().unwrap();
        assert_eq!(record.full_name.as_deref(), Some("Петрова Анна"));
        assert_eq!(record.birthday.as_deref(), Some("12.05.1990"));
        assert_eq!(record.position.as_deref(), Some("менеджер"));
        assert_eq!(record.experience.as_deref(), Some("2 года"));
        assert_eq!(record.stage, Stage::Complete);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let store = test_store().await;
        // Running again against the same connection applies nothing new.
        migrations::run_migrations(store.conn()).await.unwrap();
        store.create("1", Stage::AwaitingFullname).await.unwrap();
        assert!(store.get("1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn persists_across_connections_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intake.db");

        {
            let store = LibSqlStore::new_local(&path).await.unwrap();
            store.create("9", Stage::AwaitingFullname).await.unwrap();
            store
                .set_field("9", RegistrationField::FullName, "Сидоров Пётр", Stage::AwaitingBirthday)
                .await
                .unwrap();
        }

        let store = LibSqlStore::new_local(&path).await.unwrap();
        let record = store.get("9").await.unwrap().unwrap();
        assert_eq!(record.full_name.as_deref(), Some("Сидоров Пётр"));
        assert_eq!(record.stage, Stage::AwaitingBirthday);
    }
}
