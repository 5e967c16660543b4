use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use serde_json::Value;
use std::sync::Arc;

use super::sea_orm_entity as site_settings;
use crate::settings::application::ports::outgoing::{
    SettingsRepository, SettingsRepositoryError, StoredSetting,
};

#[derive(Debug, Clone)]
pub struct SettingsRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SettingsRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> SettingsRepositoryError {
    SettingsRepositoryError::DatabaseError(err.to_string())
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryPostgres {
    async fn list_all(&self) -> Result<Vec<StoredSetting>, SettingsRepositoryError> {
        Ok(site_settings::Entity::find()
            .order_by_asc(site_settings::Column::Key)
            .all(&*self.db)
            .await
            .map_err(db_err)?
            .iter()
            .map(site_settings::Model::to_stored)
            .collect())
    }

    async fn upsert(
        &self,
        key: String,
        value: Value,
        is_public: bool,
    ) -> Result<StoredSetting, SettingsRepositoryError> {
        let row = site_settings::ActiveModel {
            key: Set(key),
            value: Set(value),
            is_public: Set(is_public),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        let saved = site_settings::Entity::insert(row)
            .on_conflict(
                OnConflict::column(site_settings::Column::Key)
                    .update_columns([
                        site_settings::Column::Value,
                        site_settings::Column::IsPublic,
                        site_settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(saved.to_stored())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    #[tokio::test]
    async fn upsert_returns_saved_row() {
        let saved = site_settings::Model {
            key: "maintenance_mode".to_string(),
            value: json!(true),
            is_public: true,
            updated_at: Utc::now().fixed_offset(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![saved]])
            .into_connection();
        let repo = SettingsRepositoryPostgres::new(Arc::new(db));

        let stored = repo
            .upsert("maintenance_mode".to_string(), json!(true), true)
            .await
            .unwrap();

        assert_eq!(stored.key, "maintenance_mode");
        assert_eq!(stored.value, json!(true));
    }

    #[tokio::test]
    async fn database_failure_is_reported() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = SettingsRepositoryPostgres::new(Arc::new(db));

        let result = repo.list_all().await;

        assert!(matches!(result, Err(SettingsRepositoryError::DatabaseError(_))));
    }
}
