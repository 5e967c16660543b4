use async_trait::async_trait;
use uuid::Uuid;

use crate::applications::application::domain::{ApplicationStatus, JobApplication};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApplicationRepositoryError {
    #[error("Candidate already applied to this job")]
    AlreadyApplied,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub cover_letter: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<JobApplication>, ApplicationRepositoryError>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<JobApplication>, ApplicationRepositoryError>;

    async fn exists(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<bool, ApplicationRepositoryError>;

    async fn list_by_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobApplication>, ApplicationRepositoryError>;

    async fn list_by_candidate(
        &self,
        candidate_id: Uuid,
    ) -> Result<Vec<JobApplication>, ApplicationRepositoryError>;

    /// Fails with `AlreadyApplied` when the (job, candidate) pair exists.
    async fn insert(
        &self,
        application: NewApplication,
    ) -> Result<JobApplication, ApplicationRepositoryError>;

    /// Writes `next` only while the stored status is still `expected`.
    /// `None` when the application is missing or was moved by someone else.
    async fn update_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Option<JobApplication>, ApplicationRepositoryError>;
}
