use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity as jobs;
use crate::jobs::application::{
    domain::Job,
    ports::outgoing::{JobChanges, JobRepository, JobRepositoryError, NewJob},
};
use crate::shared::db::is_foreign_key_violation;

#[derive(Debug, Clone)]
pub struct JobRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl JobRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> JobRepositoryError {
    if is_foreign_key_violation(&err) {
        JobRepositoryError::UnknownEmployer
    } else {
        JobRepositoryError::DatabaseError(err.to_string())
    }
}

fn to_job(model: jobs::Model) -> Result<Job, JobRepositoryError> {
    model.to_domain().map_err(JobRepositoryError::DatabaseError)
}

/// Rows with an unreadable job type are left out of listings.
fn readable(models: Vec<jobs::Model>) -> Vec<Job> {
    models
        .into_iter()
        .filter_map(|m| match m.to_domain() {
            Ok(job) => Some(job),
            Err(e) => {
                tracing::warn!("Skipping job: {}", e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl JobRepository for JobRepositoryPostgres {
    async fn list_all(&self) -> Result<Vec<Job>, JobRepositoryError> {
        let models = jobs::Entity::find()
            .order_by_desc(jobs::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?;
        Ok(readable(models))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobRepositoryError> {
        jobs::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(to_job)
            .transpose()
    }

    async fn list_by_employer(&self, employer_id: Uuid) -> Result<Vec<Job>, JobRepositoryError> {
        let models = jobs::Entity::find()
            .filter(jobs::Column::EmployerId.eq(employer_id))
            .order_by_desc(jobs::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?;
        Ok(readable(models))
    }

    async fn insert(&self, job: NewJob) -> Result<Job, JobRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = jobs::ActiveModel {
            id: Set(Uuid::new_v4()),
            employer_id: Set(job.employer_id),
            title: Set(job.title),
            description: Set(job.description),
            requirements: Set(job.requirements),
            salary_min: Set(job.salary_min),
            salary_max: Set(job.salary_max),
            location: Set(job.location),
            job_type: Set(job.job_type.as_str().to_string()),
            is_active: Set(true),
            deadline: Set(job.deadline.map(|d| d.fixed_offset())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(db_err)?;

        to_job(model)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: JobChanges,
    ) -> Result<Option<Job>, JobRepositoryError> {
        let Some(existing) = jobs::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(requirements) = changes.requirements {
            active.requirements = Set(requirements);
        }
        if let Some(salary_min) = changes.salary_min {
            active.salary_min = Set(salary_min);
        }
        if let Some(salary_max) = changes.salary_max {
            active.salary_max = Set(salary_max);
        }
        if let Some(location) = changes.location {
            active.location = Set(location);
        }
        if let Some(job_type) = changes.job_type {
            active.job_type = Set(job_type.as_str().to_string());
        }
        if let Some(deadline) = changes.deadline {
            active.deadline = Set(deadline.map(|d| d.fixed_offset()));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }

        let updated = active.update(&*self.db).await.map_err(db_err)?;
        to_job(updated).map(Some)
    }
}
