//! In-memory `RegistrationStore` backend for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::intake::Stage;
use crate::store::traits::{RegistrationField, RegistrationRecord, RegistrationStore};

/// HashMap-backed store with the same semantics as the libSQL backend.
pub struct MemoryStore {
    records: RwLock<HashMap<String, RegistrationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn get(&self, participant_id: &str) -> Result<Option<RegistrationRecord>, StoreError> {
        Ok(self.records.read().await.get(participant_id).cloned())
    }

    async fn create(&self, participant_id: &str, stage: Stage) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.entry(participant_id.to_string()).or_insert_with(|| {
            let now = Utc::now();
            RegistrationRecord {
                participant_id: participant_id.to_string(),
                full_name: None,
                birthday: None,
                position: None,
                experience: None,
                stage,
                created_at: now,
                updated_at: now,
            }
        });
        Ok(())
    }

    async fn set_field(
        &self,
        participant_id: &str,
        field: RegistrationField,
        value: &str,
        stage: Stage,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(participant_id) else {
            return Err(StoreError::Query(format!(
                "set_field({field}): no record for participant {participant_id}"
            )));
        };
        let value = Some(value.to_string());
        match field {
            RegistrationField::FullName => record.full_name = value,
            RegistrationField::Birthday => record.birthday = value,
            RegistrationField::Position => record.position = value,
            RegistrationField::Experience => record.experience = value,
        }
        record.stage = stage;
        record.updated_at = Utc::now();
        Ok(())
    }
}
