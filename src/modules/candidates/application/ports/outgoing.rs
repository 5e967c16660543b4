use async_trait::async_trait;
use uuid::Uuid;

use crate::candidates::application::domain::Candidate;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CandidateRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub cv_url: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Candidate>, CandidateRepositoryError>;

    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Candidate>, CandidateRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, CandidateRepositoryError>;

    async fn update_by_user(
        &self,
        user_id: Uuid,
        changes: CandidateChanges,
    ) -> Result<Option<Candidate>, CandidateRepositoryError>;
}
