use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::jobs::application::domain::{Job, JobType};

#[derive(Debug, Clone, thiserror::Error)]
pub enum JobRepositoryError {
    #[error("Employer does not exist")]
    UnknownEmployer,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
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

/// `None` leaves a column untouched. `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Option<String>>,
    pub salary_min: Option<Option<i64>>,
    pub salary_max: Option<Option<i64>>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub deadline: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Job>, JobRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobRepositoryError>;

    async fn list_by_employer(&self, employer_id: Uuid) -> Result<Vec<Job>, JobRepositoryError>;

    async fn insert(&self, job: NewJob) -> Result<Job, JobRepositoryError>;

    async fn update(&self, id: Uuid, changes: JobChanges)
        -> Result<Option<Job>, JobRepositoryError>;
}
