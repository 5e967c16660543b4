use async_trait::async_trait;

use crate::settings::application::{
    domain::{SettingValue, SitePolicy, SiteSetting},
    ports::{
        incoming::{SettingsError, SettingsUseCase, UpsertSettingCommand},
        outgoing::{SettingsRepository, SettingsRepositoryError, StoredSetting},
    },
};

impl From<SettingsRepositoryError> for SettingsError {
    fn from(err: SettingsRepositoryError) -> Self {
        match err {
            SettingsRepositoryError::DatabaseError(msg) => SettingsError::Internal(msg),
        }
    }
}

fn to_setting(stored: StoredSetting) -> Result<SiteSetting, String> {
    let value = SettingValue::parse(&stored.key, stored.value).map_err(|e| e.to_string())?;
    Ok(SiteSetting {
        value,
        is_public: stored.is_public,
        updated_at: stored.updated_at,
    })
}

pub struct SettingsService<R>
where
    R: SettingsRepository,
{
    repository: R,
}

impl<R> SettingsService<R>
where
    R: SettingsRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Every stored row that satisfies the schema. Others are logged and left out.
    async fn valid_settings(&self) -> Result<Vec<SiteSetting>, SettingsError> {
        Ok(self
            .repository
            .list_all()
            .await?
            .into_iter()
            .filter_map(|stored| match to_setting(stored) {
                Ok(setting) => Some(setting),
                Err(e) => {
                    tracing::warn!("Ignoring stored setting: {}", e);
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl<R> SettingsUseCase for SettingsService<R>
where
    R: SettingsRepository,
{
    async fn list_public(&self) -> Result<Vec<SiteSetting>, SettingsError> {
        Ok(self
            .valid_settings()
            .await?
            .into_iter()
            .filter(|s| s.is_public)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<SiteSetting>, SettingsError> {
        self.valid_settings().await
    }

    async fn upsert(&self, command: UpsertSettingCommand) -> Result<SiteSetting, SettingsError> {
        let key = command.value.key();
        let is_public = match command.is_public {
            Some(flag) => flag,
            None => self
                .repository
                .list_all()
                .await?
                .iter()
                .find(|s| s.key == key)
                .map(|s| s.is_public)
                .unwrap_or(false),
        };

        let stored = self
            .repository
            .upsert(key.to_string(), command.value.to_json(), is_public)
            .await?;

        to_setting(stored).map_err(SettingsError::Internal)
    }

    async fn policy(&self) -> Result<SitePolicy, SettingsError> {
        Ok(SitePolicy::from_settings(&self.valid_settings().await?))
    }
}
