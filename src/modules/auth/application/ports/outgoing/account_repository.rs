use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Account, AccountCredentials, UserType};

/// Everything needed to create a profile and its role-specific row.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub user_type: UserType,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountRepositoryError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Stored account is invalid: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Inserts the profile and the company/candidate row in one transaction.
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountRepositoryError>;

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, AccountRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountRepositoryError>;
}
