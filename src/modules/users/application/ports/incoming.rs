use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Account, UserType};
use crate::shared::listing::ListQuery;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateUserCommandError {
    #[error("Name cannot be empty")]
    EmptyName,
}

#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    name: String,
}

impl UpdateUserCommand {
    pub fn new(name: String) -> Result<Self, UpdateUserCommandError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(UpdateUserCommandError::EmptyName);
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserUseCase: Send + Sync {
    async fn list(
        &self,
        query: ListQuery,
        user_type: Option<UserType>,
    ) -> Result<Vec<Account>, UserError>;

    async fn get(&self, id: Uuid) -> Result<Account, UserError>;

    async fn update(&self, id: Uuid, command: UpdateUserCommand) -> Result<Account, UserError>;

    /// Activation toggle; deactivation notifies the account holder.
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Account, UserError>;

    async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<Account, UserError>;
}
