use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity as candidates;
use crate::candidates::application::{
    domain::Candidate,
    ports::outgoing::{CandidateChanges, CandidateRepository, CandidateRepositoryError},
};

#[derive(Debug, Clone)]
pub struct CandidateRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CandidateRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> CandidateRepositoryError {
    CandidateRepositoryError::DatabaseError(err.to_string())
}

/// Empty strings clear optional columns.
fn optional(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

#[async_trait]
impl CandidateRepository for CandidateRepositoryPostgres {
    async fn list_all(&self) -> Result<Vec<Candidate>, CandidateRepositoryError> {
        Ok(candidates::Entity::find()
            .order_by_desc(candidates::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?
            .iter()
            .map(candidates::Model::to_domain)
            .collect())
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Candidate>, CandidateRepositoryError> {
        Ok(candidates::Entity::find()
            .filter(candidates::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(|m| m.to_domain()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, CandidateRepositoryError> {
        Ok(candidates::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(|m| m.to_domain()))
    }

    async fn update_by_user(
        &self,
        user_id: Uuid,
        changes: CandidateChanges,
    ) -> Result<Option<Candidate>, CandidateRepositoryError> {
        let Some(existing) = candidates::Entity::find()
            .filter(candidates::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(optional(phone));
        }
        if let Some(description) = changes.description {
            active.description = Set(optional(description));
        }
        if let Some(cv_url) = changes.cv_url {
            active.cv_url = Set(optional(cv_url));
        }

        let updated = active.update(&*self.db).await.map_err(db_err)?;
        Ok(Some(updated.to_domain()))
    }
}
