use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::jobs::application::domain::{Job, JobType};
use crate::shared::listing::ListQuery;

//
// ──────────────────────────────────────────────────────────
// Commands
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobCommandError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Salary values cannot be negative")]
    NegativeSalary,

    #[error("Minimum salary exceeds maximum salary")]
    InvalidSalaryRange,

    #[error("Nothing to update")]
    NoChanges,
}

/// Raw, unvalidated job fields as they arrive from a form.
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub employer_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateJobCommand {
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: String,
    pub job_type: JobType,
    pub deadline: Option<DateTime<Utc>>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, JobCommandError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(JobCommandError::MissingField(field))
}

fn check_salaries(min: Option<i64>, max: Option<i64>) -> Result<(), JobCommandError> {
    if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
        return Err(JobCommandError::NegativeSalary);
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(JobCommandError::InvalidSalaryRange);
        }
    }
    Ok(())
}

impl CreateJobCommand {
    pub fn new(draft: JobDraft) -> Result<Self, JobCommandError> {
        let title = required(draft.title, "title")?;
        let employer_id = draft
            .employer_id
            .ok_or(JobCommandError::MissingField("employer"))?;
        let location = required(draft.location, "location")?;
        check_salaries(draft.salary_min, draft.salary_max)?;

        Ok(Self {
            employer_id,
            title,
            description: draft.description.map(|d| d.trim().to_string()).unwrap_or_default(),
            requirements: draft
                .requirements
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            salary_min: draft.salary_min,
            salary_max: draft.salary_max,
            location,
            job_type: draft.job_type.unwrap_or_default(),
            deadline: draft.deadline,
        })
    }
}

/// Partial edit. The employer of a job never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateJobCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub deadline: Option<DateTime<Utc>>,
}

impl UpdateJobCommand {
    pub fn new(draft: JobDraft) -> Result<Self, JobCommandError> {
        let is_empty = draft.title.is_none()
            && draft.description.is_none()
            && draft.requirements.is_none()
            && draft.salary_min.is_none()
            && draft.salary_max.is_none()
            && draft.location.is_none()
            && draft.job_type.is_none()
            && draft.deadline.is_none();
        if is_empty {
            return Err(JobCommandError::NoChanges);
        }

        let title = match draft.title {
            Some(t) => Some(required(Some(t), "title")?),
            None => None,
        };
        let location = match draft.location {
            Some(l) => Some(required(Some(l), "location")?),
            None => None,
        };
        check_salaries(draft.salary_min, draft.salary_max)?;

        Ok(Self {
            title,
            description: draft.description.map(|d| d.trim().to_string()),
            requirements: draft.requirements.map(|r| r.trim().to_string()),
            salary_min: draft.salary_min,
            salary_max: draft.salary_max,
            location,
            job_type: draft.job_type,
            deadline: draft.deadline,
        })
    }
}

//
// ──────────────────────────────────────────────────────────
// Errors & use case
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum JobError {
    #[error("Job not found")]
    NotFound,

    #[error("Employer not found")]
    EmployerNotFound,

    #[error("Job does not belong to this company")]
    NotOwner,

    #[error("Company already has {0} open jobs, the maximum allowed")]
    QuotaReached(u32),

    #[error("{0}")]
    Invalid(JobCommandError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobUseCase: Send + Sync {
    /// Open jobs only: active and not past deadline.
    async fn list_public(&self, query: ListQuery) -> Result<Vec<Job>, JobError>;

    async fn get(&self, id: Uuid) -> Result<Job, JobError>;

    async fn list(&self, query: ListQuery) -> Result<Vec<Job>, JobError>;

    async fn list_for_employer(&self, employer_id: Uuid) -> Result<Vec<Job>, JobError>;

    async fn create(&self, command: CreateJobCommand) -> Result<Job, JobError>;

    async fn update(&self, id: Uuid, command: UpdateJobCommand) -> Result<Job, JobError>;

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Job, JobError>;
}
