use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::admin::application::{
    domain::{role::SUPER_ADMIN_ROLE, AdminRole, Administrator},
    ports::{
        incoming::{
            AdminRoleError, AdminRoleUseCase, AppointAdministratorCommand, CreateRoleCommand,
            UpdateRoleCommand,
        },
        outgoing::{AdminRoleRepository, AdminRoleRepositoryError, NewAdminRole, RoleChanges},
    },
};
use crate::auth::application::ports::outgoing::AccountRepository;
use crate::email::application::ports::outgoing::AccountNotifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Appointed(Uuid),
    AlreadyAdministrator,
    ProfileNotFound,
}

pub struct AdminRoleService<R>
where
    R: AdminRoleRepository,
{
    repository: R,
    accounts: Arc<dyn AccountRepository>,
    notifier: Arc<dyn AccountNotifier>,
}

impl From<AdminRoleRepositoryError> for AdminRoleError {
    fn from(err: AdminRoleRepositoryError) -> Self {
        match err {
            AdminRoleRepositoryError::NameTaken => AdminRoleError::NameTaken,
            AdminRoleRepositoryError::AlreadyAdministrator => AdminRoleError::AlreadyAdministrator,
            other => AdminRoleError::Internal(other.to_string()),
        }
    }
}

impl<R> AdminRoleService<R>
where
    R: AdminRoleRepository,
{
    pub fn new(
        repository: R,
        accounts: Arc<dyn AccountRepository>,
        notifier: Arc<dyn AccountNotifier>,
    ) -> Self {
        Self {
            repository,
            accounts,
            notifier,
        }
    }

    /// Makes the profile registered under `email` a `super_admin`.
    pub async fn bootstrap(&self, email: &str) -> Result<BootstrapOutcome, AdminRoleError> {
        let Some(credentials) = self
            .accounts
            .find_credentials(email)
            .await
            .map_err(|e| AdminRoleError::Internal(e.to_string()))?
        else {
            return Ok(BootstrapOutcome::ProfileNotFound);
        };
        let user_id = credentials.account.id;

        if let Some(existing) = self.repository.find_administrator_by_user(user_id).await? {
            if existing.is_active {
                return Ok(BootstrapOutcome::AlreadyAdministrator);
            }
        }

        let role = self
            .repository
            .find_role_by_name(SUPER_ADMIN_ROLE)
            .await?
            .ok_or_else(|| AdminRoleError::Internal("super_admin role is not seeded".into()))?;

        let admin = self.repository.upsert_administrator(user_id, role.id).await?;
        info!(user_id = %user_id, "Bootstrap administrator appointed");
        Ok(BootstrapOutcome::Appointed(admin.id))
    }
}

#[async_trait]
impl<R> AdminRoleUseCase for AdminRoleService<R>
where
    R: AdminRoleRepository,
{
    async fn list_roles(&self) -> Result<Vec<AdminRole>, AdminRoleError> {
        Ok(self.repository.list_roles().await?)
    }

    async fn create_role(&self, command: CreateRoleCommand) -> Result<AdminRole, AdminRoleError> {
        let role = self
            .repository
            .insert_role(NewAdminRole {
                name: command.name().to_string(),
                permissions: command.permissions().clone(),
            })
            .await?;
        Ok(role)
    }

    async fn update_role(
        &self,
        id: Uuid,
        command: UpdateRoleCommand,
    ) -> Result<AdminRole, AdminRoleError> {
        let changes = RoleChanges {
            name: command.name,
            permissions: command.permissions,
            is_active: command.is_active,
        };
        self.repository
            .update_role(id, changes)
            .await?
            .ok_or(AdminRoleError::RoleNotFound)
    }

    async fn list_administrators(&self) -> Result<Vec<Administrator>, AdminRoleError> {
        Ok(self.repository.list_administrators().await?)
    }

    async fn appoint_administrator(
        &self,
        command: AppointAdministratorCommand,
    ) -> Result<Administrator, AdminRoleError> {
        let account = self
            .accounts
            .find_by_id(command.user_id)
            .await
            .map_err(|e| AdminRoleError::Internal(e.to_string()))?
            .ok_or(AdminRoleError::UserNotFound)?;

        let role = self
            .repository
            .find_role(command.role_id)
            .await?
            .ok_or(AdminRoleError::RoleNotFound)?;
        if !role.is_active {
            return Err(AdminRoleError::RoleInactive);
        }

        if let Some(existing) = self
            .repository
            .find_administrator_by_user(command.user_id)
            .await?
        {
            if existing.is_active {
                return Err(AdminRoleError::AlreadyAdministrator);
            }
        }

        let admin = self
            .repository
            .upsert_administrator(command.user_id, command.role_id)
            .await?;

        if let Err(e) = self
            .notifier
            .send_admin_invitation(&account.email, &account.name, &role.name)
            .await
        {
            warn!(user_id = %account.id, "Admin invitation email failed: {}", e);
        }

        Ok(admin)
    }

    async fn deactivate_administrator(&self, id: Uuid) -> Result<Administrator, AdminRoleError> {
        self.repository
            .set_administrator_active(id, false)
            .await?
            .ok_or(AdminRoleError::AdministratorNotFound)
    }
}
