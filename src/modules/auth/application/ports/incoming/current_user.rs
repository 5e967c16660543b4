use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::Account;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CurrentUserError {
    #[error("User not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<Account, CurrentUserError>;
}
