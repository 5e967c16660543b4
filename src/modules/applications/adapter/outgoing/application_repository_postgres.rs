use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity as applications;
use crate::applications::application::{
    domain::{ApplicationStatus, JobApplication},
    ports::outgoing::{ApplicationRepository, ApplicationRepositoryError, NewApplication},
};
use crate::shared::db::is_unique_violation;

#[derive(Debug, Clone)]
pub struct ApplicationRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ApplicationRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> ApplicationRepositoryError {
    if is_unique_violation(&err) {
        ApplicationRepositoryError::AlreadyApplied
    } else {
        ApplicationRepositoryError::DatabaseError(err.to_string())
    }
}

fn to_application(model: applications::Model) -> Result<JobApplication, ApplicationRepositoryError> {
    model
        .to_domain()
        .map_err(ApplicationRepositoryError::DatabaseError)
}

fn readable(models: Vec<applications::Model>) -> Vec<JobApplication> {
    models
        .into_iter()
        .filter_map(|m| match m.to_domain() {
            Ok(app) => Some(app),
            Err(e) => {
                tracing::warn!("Skipping application: {}", e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl ApplicationRepository for ApplicationRepositoryPostgres {
    async fn list_all(&self) -> Result<Vec<JobApplication>, ApplicationRepositoryError> {
        let models = applications::Entity::find()
            .order_by_desc(applications::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?;
        Ok(readable(models))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<JobApplication>, ApplicationRepositoryError> {
        applications::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(to_application)
            .transpose()
    }

    async fn exists(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<bool, ApplicationRepositoryError> {
        let count = applications::Entity::find()
            .filter(applications::Column::JobId.eq(job_id))
            .filter(applications::Column::CandidateId.eq(candidate_id))
            .count(&*self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn list_by_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobApplication>, ApplicationRepositoryError> {
        let models = applications::Entity::find()
            .filter(applications::Column::JobId.eq(job_id))
            .order_by_desc(applications::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?;
        Ok(readable(models))
    }

    async fn list_by_candidate(
        &self,
        candidate_id: Uuid,
    ) -> Result<Vec<JobApplication>, ApplicationRepositoryError> {
        let models = applications::Entity::find()
            .filter(applications::Column::CandidateId.eq(candidate_id))
            .order_by_desc(applications::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?;
        Ok(readable(models))
    }

    async fn insert(
        &self,
        application: NewApplication,
    ) -> Result<JobApplication, ApplicationRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = applications::ActiveModel {
            id: Set(Uuid::new_v4()),
            job_id: Set(application.job_id),
            candidate_id: Set(application.candidate_id),
            status: Set(ApplicationStatus::Pending.as_str().to_string()),
            cover_letter: Set(application.cover_letter),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(db_err)?;

        to_application(model)
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Option<JobApplication>, ApplicationRepositoryError> {
        let updated = applications::Entity::update_many()
            .col_expr(applications::Column::Status, Expr::value(next.as_str()))
            .col_expr(applications::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(applications::Column::Id.eq(id))
            .filter(applications::Column::Status.eq(expected.as_str()))
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_err)?;

        updated.into_iter().next().map(to_application).transpose()
    }
}
