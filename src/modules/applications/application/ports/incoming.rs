use async_trait::async_trait;
use uuid::Uuid;

use crate::applications::application::domain::{ApplicationStatus, JobApplication};
use crate::shared::status::TransitionError;

/// Who is asking for a status change. Carries the caller's profile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationActor {
    Candidate(Uuid),
    Employer(Uuid),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApplicationError {
    #[error("Job not found")]
    JobNotFound,

    #[error("Job is no longer accepting applications")]
    JobClosed,

    #[error("No candidate profile for this account")]
    CandidateProfileMissing,

    #[error("No company for this account")]
    CompanyMissing,

    #[error("You have already applied to this job")]
    AlreadyApplied,

    #[error("Application not found")]
    NotFound,

    #[error("Not allowed to act on this application")]
    Forbidden,

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    #[error("Application status was changed by another request")]
    StatusChanged,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationUseCase: Send + Sync {
    async fn apply(
        &self,
        job_id: Uuid,
        candidate_user: Uuid,
        cover_letter: Option<String>,
    ) -> Result<JobApplication, ApplicationError>;

    /// Applications received for one of the employer's jobs.
    async fn list_for_job(
        &self,
        job_id: Uuid,
        employer_user: Uuid,
    ) -> Result<Vec<JobApplication>, ApplicationError>;

    async fn list_own(&self, candidate_user: Uuid)
        -> Result<Vec<JobApplication>, ApplicationError>;

    async fn change_status(
        &self,
        id: Uuid,
        next: ApplicationStatus,
        actor: ApplicationActor,
    ) -> Result<JobApplication, ApplicationError>;
}
