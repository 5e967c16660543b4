use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::{admin_roles, administrators};
use crate::admin::application::ports::outgoing::{AdminDirectory, AdminDirectoryError};
use crate::users::adapter::outgoing::sea_orm_entity as profiles;

#[derive(Debug, Clone)]
pub struct AdminDirectoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AdminDirectoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminDirectory for AdminDirectoryPostgres {
    async fn find_active_permissions(
        &self,
        user_id: Uuid,
    ) -> Result<Option<serde_json::Value>, AdminDirectoryError> {
        let db_err = |e: sea_orm::DbErr| AdminDirectoryError::DatabaseError(e.to_string());

        let profile = profiles::Entity::find_by_id(user_id)
            .filter(profiles::Column::IsActive.eq(true))
            .one(&*self.db)
            .await
            .map_err(db_err)?;
        if profile.is_none() {
            return Ok(None);
        }

        let Some(admin) = administrators::Entity::find()
            .filter(administrators::Column::UserId.eq(user_id))
            .filter(administrators::Column::IsActive.eq(true))
            .one(&*self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let role = admin_roles::Entity::find_by_id(admin.role_id)
            .filter(admin_roles::Column::IsActive.eq(true))
            .one(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(role.map(|r| r.permissions))
    }
}
