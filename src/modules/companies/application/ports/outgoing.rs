use async_trait::async_trait;
use uuid::Uuid;

use crate::companies::application::domain::Company;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompanyRepositoryError {
    #[error("Owner already has a company")]
    OwnerTaken,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub sector: String,
    pub address: Option<String>,
    pub tax_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub is_verified: Option<bool>,
    pub is_premium: Option<bool>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Company>, CompanyRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, CompanyRepositoryError>;

    async fn find_by_owner(&self, user_id: Uuid)
        -> Result<Option<Company>, CompanyRepositoryError>;

    async fn insert(&self, company: NewCompany) -> Result<Company, CompanyRepositoryError>;

    async fn update(
        &self,
        id: Uuid,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, CompanyRepositoryError>;
}
