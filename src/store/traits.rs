//! `RegistrationStore` trait — keyed read/create/upsert of registration
//! records by participant id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StoreError;
use crate::intake::Stage;

/// A registration field collected by the intake dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    FullName,
    Birthday,
    Position,
    Experience,
}

impl RegistrationField {
    /// Column name in the `registrations` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Birthday => "birthday",
            Self::Position => "position",
            Self::Experience => "experience",
        }
    }
}

impl std::fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// A persisted registration record. The `stage` mirror makes the dialogue
/// resumable across restarts.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRecord {
    pub participant_id: String,
    pub full_name: Option<String>,
    pub birthday: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub stage: Stage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Backend-agnostic registration persistence.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Fetch a record by participant id.
    async fn get(&self, participant_id: &str) -> Result<Option<RegistrationRecord>, StoreError>;

    /// Create a fresh record at `stage`. Idempotent: an existing record is
    /// left untouched.
    async fn create(&self, participant_id: &str, stage: Stage) -> Result<(), StoreError>;

    /// Persist an accepted field value together with the stage it advances
    /// the dialogue to.
    async fn set_field(
        &self,
        participant_id: &str,
        field: RegistrationField,
        value: &str,
        stage: Stage,
    ) -> Result<(), StoreError>;
}
