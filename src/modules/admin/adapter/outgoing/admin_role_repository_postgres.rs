use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::{admin_roles, administrators};
use crate::admin::application::{
    domain::{AdminRole, Administrator},
    ports::outgoing::{AdminRoleRepository, AdminRoleRepositoryError, NewAdminRole, RoleChanges},
};
use crate::shared::db::is_unique_violation;

#[derive(Debug, Clone)]
pub struct AdminRoleRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AdminRoleRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> AdminRoleRepositoryError {
    AdminRoleRepositoryError::DatabaseError(err.to_string())
}

fn role_from(model: admin_roles::Model) -> Result<AdminRole, AdminRoleRepositoryError> {
    model
        .to_domain()
        .map_err(AdminRoleRepositoryError::CorruptRecord)
}

#[async_trait]
impl AdminRoleRepository for AdminRoleRepositoryPostgres {
    async fn list_roles(&self) -> Result<Vec<AdminRole>, AdminRoleRepositoryError> {
        admin_roles::Entity::find()
            .order_by_asc(admin_roles::Column::Name)
            .all(&*self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(role_from)
            .collect()
    }

    async fn find_role(&self, id: Uuid) -> Result<Option<AdminRole>, AdminRoleRepositoryError> {
        admin_roles::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(role_from)
            .transpose()
    }

    async fn find_role_by_name(
        &self,
        name: &str,
    ) -> Result<Option<AdminRole>, AdminRoleRepositoryError> {
        admin_roles::Entity::find()
            .filter(admin_roles::Column::Name.eq(name))
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(role_from)
            .transpose()
    }

    async fn insert_role(&self, role: NewAdminRole) -> Result<AdminRole, AdminRoleRepositoryError> {
        let model = admin_roles::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(role.name),
            permissions: Set(role.permissions.to_json()),
            is_active: Set(true),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&*self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AdminRoleRepositoryError::NameTaken
            } else {
                db_err(e)
            }
        })?;

        role_from(model)
    }

    async fn update_role(
        &self,
        id: Uuid,
        changes: RoleChanges,
    ) -> Result<Option<AdminRole>, AdminRoleRepositoryError> {
        let Some(existing) = admin_roles::Entity::find_by_id(id)
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
        if let Some(permissions) = changes.permissions {
            active.permissions = Set(permissions.to_json());
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }

        let updated = active.update(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                AdminRoleRepositoryError::NameTaken
            } else {
                db_err(e)
            }
        })?;

        role_from(updated).map(Some)
    }

    async fn list_administrators(&self) -> Result<Vec<Administrator>, AdminRoleRepositoryError> {
        Ok(administrators::Entity::find()
            .order_by_desc(administrators::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?
            .iter()
            .map(administrators::Model::to_domain)
            .collect())
    }

    async fn find_administrator_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Administrator>, AdminRoleRepositoryError> {
        Ok(administrators::Entity::find()
            .filter(administrators::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(|m| m.to_domain()))
    }

    async fn upsert_administrator(
        &self,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<Administrator, AdminRoleRepositoryError> {
        let row = administrators::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            role_id: Set(role_id),
            is_active: Set(true),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let model = administrators::Entity::insert(row)
            .on_conflict(
                OnConflict::column(administrators::Column::UserId)
                    .update_columns([
                        administrators::Column::RoleId,
                        administrators::Column::IsActive,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(model.to_domain())
    }

    async fn set_administrator_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Option<Administrator>, AdminRoleRepositoryError> {
        let Some(existing) = administrators::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        active.is_active = Set(is_active);
        let updated = active.update(&*self.db).await.map_err(db_err)?;

        Ok(Some(updated.to_domain()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::application::domain::{Permission, PermissionSet};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn role_row(name: &str, permissions: serde_json::Value) -> admin_roles::Model {
        admin_roles::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            permissions,
            is_active: true,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[tokio::test]
    async fn corrupt_permissions_are_reported() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![role_row("legacy", json!({ "all": true }))]])
            .into_connection();
        let repo = AdminRoleRepositoryPostgres::new(Arc::new(db));

        let result = repo.find_role_by_name("legacy").await;

        assert!(matches!(result, Err(AdminRoleRepositoryError::CorruptRecord(_))));
    }

    #[tokio::test]
    async fn insert_role_returns_parsed_role() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![role_row(
                "billing",
                json!({ "version": 1, "grants": ["manage_payments"] }),
            )]])
            .into_connection();
        let repo = AdminRoleRepositoryPostgres::new(Arc::new(db));

        let role = repo
            .insert_role(NewAdminRole {
                name: "billing".to_string(),
                permissions: PermissionSet::new([Permission::ManagePayments]),
            })
            .await
            .unwrap();

        assert!(role.permissions.allows(Permission::ManagePayments));
    }

    #[tokio::test]
    async fn duplicate_role_name_is_name_taken() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(
                "duplicate key value violates unique constraint \"admin_roles_name_key\""
                    .to_string(),
            )])
            .into_connection();
        let repo = AdminRoleRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .insert_role(NewAdminRole {
                name: "super_admin".to_string(),
                permissions: PermissionSet::all(),
            })
            .await;

        assert!(matches!(result, Err(AdminRoleRepositoryError::NameTaken)));
    }

    #[tokio::test]
    async fn deactivating_unknown_administrator_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<administrators::Model>::new()])
            .into_connection();
        let repo = AdminRoleRepositoryPostgres::new(Arc::new(db));

        assert!(repo
            .set_administrator_active(Uuid::new_v4(), false)
            .await
            .unwrap()
            .is_none());
    }
}
