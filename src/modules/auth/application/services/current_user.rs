use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::{
    domain::entities::Account,
    ports::{
        incoming::{CurrentUserError, CurrentUserUseCase},
        outgoing::AccountRepository,
    },
};

#[derive(Clone)]
pub struct CurrentUserService<R>
where
    R: AccountRepository,
{
    repository: R,
}

impl<R> CurrentUserService<R>
where
    R: AccountRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CurrentUserUseCase for CurrentUserService<R>
where
    R: AccountRepository,
{
    async fn execute(&self, user_id: Uuid) -> Result<Account, CurrentUserError> {
        self.repository
            .find_by_id(user_id)
            .await
            .map_err(|e| CurrentUserError::Internal(e.to_string()))?
            .ok_or(CurrentUserError::NotFound)
    }
}
