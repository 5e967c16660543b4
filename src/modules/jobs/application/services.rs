use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::jobs::application::{
    domain::Job,
    ports::{
        incoming::{CreateJobCommand, JobCommandError, JobError, JobUseCase, UpdateJobCommand},
        outgoing::{JobChanges, JobRepository, JobRepositoryError, NewJob},
    },
};
use crate::shared::listing::ListQuery;

impl From<JobRepositoryError> for JobError {
    fn from(err: JobRepositoryError) -> Self {
        match err {
            JobRepositoryError::UnknownEmployer => JobError::EmployerNotFound,
            JobRepositoryError::DatabaseError(msg) => JobError::Internal(msg),
        }
    }
}

pub struct JobService<R>
where
    R: JobRepository,
{
    repository: R,
}

impl<R> JobService<R>
where
    R: JobRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> JobUseCase for JobService<R>
where
    R: JobRepository,
{
    async fn list_public(&self, query: ListQuery) -> Result<Vec<Job>, JobError> {
        let now = Utc::now();
        let open: Vec<Job> = self
            .repository
            .list_all()
            .await?
            .into_iter()
            .filter(|job| job.is_open(now))
            .collect();
        Ok(query.apply(open))
    }

    async fn get(&self, id: Uuid) -> Result<Job, JobError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(JobError::NotFound)
    }

    async fn list(&self, query: ListQuery) -> Result<Vec<Job>, JobError> {
        Ok(query.apply(self.repository.list_all().await?))
    }

    async fn list_for_employer(&self, employer_id: Uuid) -> Result<Vec<Job>, JobError> {
        Ok(self.repository.list_by_employer(employer_id).await?)
    }

    async fn create(&self, command: CreateJobCommand) -> Result<Job, JobError> {
        let job = self
            .repository
            .insert(NewJob {
                employer_id: command.employer_id,
                title: command.title,
                description: command.description,
                requirements: command.requirements,
                salary_min: command.salary_min,
                salary_max: command.salary_max,
                location: command.location,
                job_type: command.job_type,
                deadline: command.deadline,
            })
            .await?;

        tracing::info!(job_id = %job.id, employer_id = %job.employer_id, "Job created");
        Ok(job)
    }

    async fn update(&self, id: Uuid, command: UpdateJobCommand) -> Result<Job, JobError> {
        let current = self.get(id).await?;

        // The range is checked against the row as it will be after the edit.
        let min = command.salary_min.or(current.salary_min);
        let max = command.salary_max.or(current.salary_max);
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(JobError::Invalid(JobCommandError::InvalidSalaryRange));
            }
        }

        let changes = JobChanges {
            title: command.title,
            description: command.description,
            requirements: command
                .requirements
                .map(|r| Some(r).filter(|r| !r.is_empty())),
            salary_min: command.salary_min.map(Some),
            salary_max: command.salary_max.map(Some),
            location: command.location,
            job_type: command.job_type,
            deadline: command.deadline.map(Some),
            is_active: None,
        };

        self.repository
            .update(id, changes)
            .await?
            .ok_or(JobError::NotFound)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Job, JobError> {
        self.repository
            .update(
                id,
                JobChanges {
                    is_active: Some(active),
                    ..Default::default()
                },
            )
            .await?
            .ok_or(JobError::NotFound)
    }
}
