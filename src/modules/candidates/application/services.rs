use async_trait::async_trait;
use uuid::Uuid;

use crate::candidates::application::{
    domain::Candidate,
    ports::{
        incoming::{CandidateError, CandidateUseCase, UpdateCandidateCommand},
        outgoing::{CandidateChanges, CandidateRepository, CandidateRepositoryError},
    },
};
use crate::shared::listing::ListQuery;

impl From<CandidateRepositoryError> for CandidateError {
    fn from(err: CandidateRepositoryError) -> Self {
        match err {
            CandidateRepositoryError::DatabaseError(msg) => CandidateError::Internal(msg),
        }
    }
}

pub struct CandidateService<R>
where
    R: CandidateRepository,
{
    repository: R,
}

impl<R> CandidateService<R>
where
    R: CandidateRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CandidateUseCase for CandidateService<R>
where
    R: CandidateRepository,
{
    async fn list(&self, query: ListQuery) -> Result<Vec<Candidate>, CandidateError> {
        Ok(query.apply(self.repository.list_all().await?))
    }

    async fn get_own(&self, user_id: Uuid) -> Result<Candidate, CandidateError> {
        self.repository
            .find_by_user(user_id)
            .await?
            .ok_or(CandidateError::NotFound)
    }

    async fn update_own(
        &self,
        user_id: Uuid,
        command: UpdateCandidateCommand,
    ) -> Result<Candidate, CandidateError> {
        self.repository
            .update_by_user(
                user_id,
                CandidateChanges {
                    name: command.name,
                    phone: command.phone,
                    description: command.description,
                    cv_url: command.cv_url,
                },
            )
            .await?
            .ok_or(CandidateError::NotFound)
    }
}
