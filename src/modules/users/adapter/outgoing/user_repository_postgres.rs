use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity as profiles;
use crate::auth::application::domain::entities::Account;
use crate::users::application::ports::outgoing::{
    ProfileChanges, UserRepository, UserRepositoryError,
};

#[derive(Debug, Clone)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> UserRepositoryError {
    UserRepositoryError::DatabaseError(err.to_string())
}

fn to_account(model: &profiles::Model) -> Result<Account, UserRepositoryError> {
    model.to_account().map_err(UserRepositoryError::CorruptRecord)
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn list_all(&self) -> Result<Vec<Account>, UserRepositoryError> {
        let rows = profiles::Entity::find()
            .order_by_desc(profiles::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?;

        // One bad row must not hide the rest of the back-office list
        Ok(rows
            .iter()
            .filter_map(|m| match to_account(m) {
                Ok(a) => Some(a),
                Err(e) => {
                    tracing::warn!("Skipping profile: {}", e);
                    None
                }
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, UserRepositoryError> {
        profiles::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .as_ref()
            .map(to_account)
            .transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<Account>, UserRepositoryError> {
        let Some(existing) = profiles::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(verified) = changes.email_verified {
            active.email_verified = Set(verified);
        }

        let updated = active.update(&*self.db).await.map_err(db_err)?;
        to_account(&updated).map(Some)
    }
}
