use async_trait::async_trait;
use uuid::Uuid;

use crate::admin::application::domain::{AdminRole, Administrator, Permission, PermissionSet};

//
// ──────────────────────────────────────────────────────────
// Commands
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleCommandError {
    #[error("Role name cannot be empty")]
    EmptyName,

    #[error("Role name may only contain lowercase letters, digits and underscores")]
    InvalidName,

    #[error("Nothing to update")]
    NoChanges,
}

fn validate_role_name(name: &str) -> Result<String, RoleCommandError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RoleCommandError::EmptyName);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(RoleCommandError::InvalidName);
    }
    Ok(name.to_string())
}

#[derive(Debug, Clone)]
pub struct CreateRoleCommand {
    name: String,
    permissions: PermissionSet,
}

impl CreateRoleCommand {
    pub fn new(name: String, grants: Vec<Permission>) -> Result<Self, RoleCommandError> {
        Ok(Self {
            name: validate_role_name(&name)?,
            permissions: PermissionSet::new(grants),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoleCommand {
    pub name: Option<String>,
    pub permissions: Option<PermissionSet>,
    pub is_active: Option<bool>,
}

impl UpdateRoleCommand {
    pub fn new(
        name: Option<String>,
        grants: Option<Vec<Permission>>,
        is_active: Option<bool>,
    ) -> Result<Self, RoleCommandError> {
        if name.is_none() && grants.is_none() && is_active.is_none() {
            return Err(RoleCommandError::NoChanges);
        }
        let name = name.as_deref().map(validate_role_name).transpose()?;

        Ok(Self {
            name,
            permissions: grants.map(PermissionSet::new),
            is_active,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AppointAdministratorCommand {
    pub user_id: Uuid,
    pub role_id: Uuid,
}

//
// ──────────────────────────────────────────────────────────
// Use Case
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdminRoleError {
    #[error("Role not found")]
    RoleNotFound,

    #[error("Administrator not found")]
    AdministratorNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Role name already in use")]
    NameTaken,

    #[error("User is already an administrator")]
    AlreadyAdministrator,

    #[error("Role is inactive")]
    RoleInactive,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRoleUseCase: Send + Sync {
    async fn list_roles(&self) -> Result<Vec<AdminRole>, AdminRoleError>;

    async fn create_role(&self, command: CreateRoleCommand) -> Result<AdminRole, AdminRoleError>;

    async fn update_role(
        &self,
        id: Uuid,
        command: UpdateRoleCommand,
    ) -> Result<AdminRole, AdminRoleError>;

    async fn list_administrators(&self) -> Result<Vec<Administrator>, AdminRoleError>;

    async fn appoint_administrator(
        &self,
        command: AppointAdministratorCommand,
    ) -> Result<Administrator, AdminRoleError>;

    async fn deactivate_administrator(&self, id: Uuid) -> Result<Administrator, AdminRoleError>;
}
