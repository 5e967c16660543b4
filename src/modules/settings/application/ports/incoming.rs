use async_trait::async_trait;
use serde_json::Value;

use crate::settings::application::domain::{SettingError, SettingValue, SitePolicy, SiteSetting};

#[derive(Debug, Clone, PartialEq)]
pub struct UpsertSettingCommand {
    pub value: SettingValue,
    /// `None` keeps the current visibility (private for a new key).
    pub is_public: Option<bool>,
}

impl UpsertSettingCommand {
    pub fn new(key: &str, value: Value, is_public: Option<bool>) -> Result<Self, SettingError> {
        Ok(Self {
            value: SettingValue::parse(key.trim(), value)?,
            is_public,
        })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Invalid(#[from] SettingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsUseCase: Send + Sync {
    async fn list_public(&self) -> Result<Vec<SiteSetting>, SettingsError>;

    async fn list_all(&self) -> Result<Vec<SiteSetting>, SettingsError>;

    async fn upsert(&self, command: UpsertSettingCommand) -> Result<SiteSetting, SettingsError>;

    /// Registration and job quota, read fresh on each call.
    async fn policy(&self) -> Result<SitePolicy, SettingsError>;
}
