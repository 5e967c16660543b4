use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Account, UserType};
use crate::email::application::ports::outgoing::AccountNotifier;
use crate::shared::listing::ListQuery;
use crate::users::application::ports::{
    incoming::{UpdateUserCommand, UserError, UserUseCase},
    outgoing::{ProfileChanges, UserRepository, UserRepositoryError},
};

impl From<UserRepositoryError> for UserError {
    fn from(err: UserRepositoryError) -> Self {
        UserError::Internal(err.to_string())
    }
}

pub struct UserService<R>
where
    R: UserRepository,
{
    repository: R,
    notifier: Arc<dyn AccountNotifier>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    pub fn new(repository: R, notifier: Arc<dyn AccountNotifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    async fn apply(&self, id: Uuid, changes: ProfileChanges) -> Result<Account, UserError> {
        self.repository
            .update(id, changes)
            .await?
            .ok_or(UserError::NotFound)
    }

    async fn notify_deactivation(&self, account: &Account) {
        let lines = vec![
            format!("Your account {} has been deactivated.", account.email),
            "Contact support if you think this is a mistake.".to_string(),
        ];
        if let Err(e) = self
            .notifier
            .send_admin_notification(&account.email, "Account deactivated", &lines)
            .await
        {
            warn!(user_id = %account.id, "Deactivation notice failed: {}", e);
        }
    }
}

#[async_trait]
impl<R> UserUseCase for UserService<R>
where
    R: UserRepository,
{
    async fn list(
        &self,
        query: ListQuery,
        user_type: Option<UserType>,
    ) -> Result<Vec<Account>, UserError> {
        let mut users = self.repository.list_all().await?;
        if let Some(wanted) = user_type {
            users.retain(|u| u.user_type == wanted);
        }
        Ok(query.apply(users))
    }

    async fn get(&self, id: Uuid) -> Result<Account, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound)
    }

    async fn update(&self, id: Uuid, command: UpdateUserCommand) -> Result<Account, UserError> {
        self.apply(
            id,
            ProfileChanges {
                name: Some(command.name().to_string()),
                ..Default::default()
            },
        )
        .await
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Account, UserError> {
        let account = self
            .apply(
                id,
                ProfileChanges {
                    is_active: Some(is_active),
                    ..Default::default()
                },
            )
            .await?;

        if !is_active {
            self.notify_deactivation(&account).await;
        }
        Ok(account)
    }

    async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<Account, UserError> {
        self.apply(
            id,
            ProfileChanges {
                email_verified: Some(verified),
                ..Default::default()
            },
        )
        .await
    }
}
