use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// A row as stored, before schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSetting {
    pub key: String,
    pub value: Value,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<StoredSetting>, SettingsRepositoryError>;

    async fn upsert(
        &self,
        key: String,
        value: Value,
        is_public: bool,
    ) -> Result<StoredSetting, SettingsRepositoryError>;
}
