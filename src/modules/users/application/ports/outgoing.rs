use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::Account;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("Corrupt profile record: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub email_verified: Option<bool>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Account>, UserRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, UserRepositoryError>;

    /// `None` when no profile has this id.
    async fn update(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<Account>, UserRepositoryError>;
}
