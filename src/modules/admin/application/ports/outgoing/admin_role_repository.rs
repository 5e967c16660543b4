use async_trait::async_trait;
use uuid::Uuid;

use crate::admin::application::domain::{AdminRole, Administrator, PermissionSet};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdminRoleRepositoryError {
    #[error("Role name already in use")]
    NameTaken,

    #[error("User is already an administrator")]
    AlreadyAdministrator,

    #[error("Corrupt admin record: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone)]
pub struct NewAdminRole {
    pub name: String,
    pub permissions: PermissionSet,
}

#[derive(Debug, Clone, Default)]
pub struct RoleChanges {
    pub name: Option<String>,
    pub permissions: Option<PermissionSet>,
    pub is_active: Option<bool>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRoleRepository: Send + Sync {
    async fn list_roles(&self) -> Result<Vec<AdminRole>, AdminRoleRepositoryError>;

    async fn find_role(&self, id: Uuid) -> Result<Option<AdminRole>, AdminRoleRepositoryError>;

    async fn find_role_by_name(
        &self,
        name: &str,
    ) -> Result<Option<AdminRole>, AdminRoleRepositoryError>;

    async fn insert_role(&self, role: NewAdminRole) -> Result<AdminRole, AdminRoleRepositoryError>;

    async fn update_role(
        &self,
        id: Uuid,
        changes: RoleChanges,
    ) -> Result<Option<AdminRole>, AdminRoleRepositoryError>;

    async fn list_administrators(&self) -> Result<Vec<Administrator>, AdminRoleRepositoryError>;

    async fn find_administrator_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Administrator>, AdminRoleRepositoryError>;

    /// Creates the administrator row, or reactivates it under `role_id`.
    async fn upsert_administrator(
        &self,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<Administrator, AdminRoleRepositoryError>;

    async fn set_administrator_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Option<Administrator>, AdminRoleRepositoryError>;
}
