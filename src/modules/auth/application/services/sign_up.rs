use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::application::{
    domain::entities::Account,
    ports::{
        incoming::{SignUpCommand, SignUpError, SignUpOutput, SignUpUseCase},
        outgoing::{AccountRepository, AccountRepositoryError, NewAccount, PasswordHasher},
    },
};
use crate::email::application::ports::outgoing::AccountNotifier;

const WELCOME_EMAIL_ATTEMPTS: u32 = 3;

/// Creates the account, then sends the welcome email in the background.
#[derive(Clone)]
pub struct SignUpService<R>
where
    R: AccountRepository,
{
    repository: R,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn AccountNotifier>,
    retry_base: Duration,
}

impl<R> SignUpService<R>
where
    R: AccountRepository,
{
    pub fn new(
        repository: R,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn AccountNotifier>,
    ) -> Self {
        Self {
            repository,
            hasher,
            notifier,
            retry_base: Duration::from_secs(2),
        }
    }

    #[cfg(test)]
    fn with_retry_base(mut self, retry_base: Duration) -> Self {
        self.retry_base = retry_base;
        self
    }

    fn spawn_welcome_email(&self, account: Account) {
        let notifier = Arc::clone(&self.notifier);
        let retry_base = self.retry_base;

        tokio::spawn(async move {
            for attempt in 1..=WELCOME_EMAIL_ATTEMPTS {
                match notifier.send_welcome(&account).await {
                    Ok(()) => return,
                    Err(e) if attempt < WELCOME_EMAIL_ATTEMPTS => {
                        tracing::warn!(
                            "Welcome email attempt {}/{} failed for user {}: {}. Retrying...",
                            attempt,
                            WELCOME_EMAIL_ATTEMPTS,
                            account.id,
                            e
                        );
                        tokio::time::sleep(retry_base * 2_u32.pow(attempt - 1)).await;
                    }
                    Err(e) => {
                        tracing::error!(
                            "All {} welcome email attempts failed for user {}: {}",
                            WELCOME_EMAIL_ATTEMPTS,
                            account.id,
                            e
                        );
                    }
                }
            }
        });
    }
}

#[async_trait]
impl<R> SignUpUseCase for SignUpService<R>
where
    R: AccountRepository,
{
    async fn execute(&self, command: SignUpCommand) -> Result<SignUpOutput, SignUpError> {
        let password_hash = self
            .hasher
            .hash_password(command.password())
            .await
            .map_err(|e| SignUpError::Internal(e.to_string()))?;

        let account = self
            .repository
            .create_account(NewAccount {
                email: command.email().to_string(),
                password_hash,
                name: command.name().to_string(),
                user_type: command.user_type(),
                company_name: command.company_name().map(str::to_string),
                sector: command.sector(),
                phone: command.phone().map(str::to_string),
            })
            .await
            .map_err(|e| match e {
                AccountRepositoryError::EmailTaken => SignUpError::EmailTaken,
                other => SignUpError::Internal(other.to_string()),
            })?;

        tracing::info!(
            "Account {} created ({})",
            account.id,
            account.user_type.as_str()
        );

        self.spawn_welcome_email(account.clone());

        Ok(SignUpOutput {
            account,
            message: "Account created successfully.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{AccountCredentials, UserType};
    use crate::auth::application::ports::outgoing::HashError;
    use crate::email::application::ports::outgoing::NotificationError;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;
    use uuid::Uuid;

    // ──────────────────────────────────────────────────────────
    // Mocks
    // ──────────────────────────────────────────────────────────

    #[derive(Clone, Default)]
    struct MockAccountRepository {
        taken: bool,
        created: Arc<Mutex<Vec<NewAccount>>>,
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn create_account(
            &self,
            account: NewAccount,
        ) -> Result<Account, AccountRepositoryError> {
            if self.taken {
                return Err(AccountRepositoryError::EmailTaken);
            }
            self.created.lock().unwrap().push(account.clone());
            Ok(Account {
                id: Uuid::new_v4(),
                email: account.email,
                name: account.name,
                user_type: account.user_type,
                is_active: true,
                email_verified: false,
                created_at: Utc::now(),
            })
        }

        async fn find_credentials(
            &self,
            _email: &str,
        ) -> Result<Option<AccountCredentials>, AccountRepositoryError> {
            unimplemented!("Not used in sign up tests")
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Account>, AccountRepositoryError> {
            unimplemented!("Not used in sign up tests")
        }
    }

    struct PlainHasher;

    #[async_trait]
    impl PasswordHasher for PlainHasher {
        async fn hash_password(&self, password: &str) -> Result<String, HashError> {
            Ok(format!("hashed:{password}"))
        }

        async fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, HashError> {
            unimplemented!("Not used in sign up tests")
        }
    }

    struct CountingNotifier {
        failures_before_success: u32,
        attempts: AtomicU32,
        done: Notify,
    }

    impl CountingNotifier {
        fn new(failures_before_success: u32) -> Arc<Self> {
            Arc::new(Self {
                failures_before_success,
                attempts: AtomicU32::new(0),
                done: Notify::new(),
            })
        }
    }

    #[async_trait]
    impl AccountNotifier for CountingNotifier {
        async fn send_welcome(&self, _account: &Account) -> Result<(), NotificationError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt <= self.failures_before_success {
                if attempt == WELCOME_EMAIL_ATTEMPTS {
                    self.done.notify_one();
                }
                return Err(NotificationError::EmailSendingFailed("SMTP down".into()));
            }
            self.done.notify_one();
            Ok(())
        }

        async fn send_admin_invitation(
            &self,
            _email: &str,
            _name: &str,
            _role_name: &str,
        ) -> Result<(), NotificationError> {
            unimplemented!("Not used in sign up tests")
        }

        async fn send_admin_notification(
            &self,
            _email: &str,
            _title: &str,
            _lines: &[String],
        ) -> Result<(), NotificationError> {
            unimplemented!("Not used in sign up tests")
        }
    }

    // ──────────────────────────────────────────────────────────
    // Helpers
    // ──────────────────────────────────────────────────────────

    fn company_command() -> SignUpCommand {
        SignUpCommand::new(
            "hr@acme.com".to_string(),
            "password123".to_string(),
            "Acme HR".to_string(),
            UserType::Company,
            Some("Acme".to_string()),
            Some("Logistics".to_string()),
            None,
        )
        .unwrap()
    }

    // ──────────────────────────────────────────────────────────
    // Tests
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn creates_account_with_hashed_password_and_company_row() {
        // Arrange
        let repo = MockAccountRepository::default();
        let notifier = CountingNotifier::new(0);
        let service = SignUpService::new(repo.clone(), Arc::new(PlainHasher), notifier.clone());

        // Act
        let output = service.execute(company_command()).await.unwrap();
        notifier.done.notified().await;

        // Assert
        assert_eq!(output.account.email, "hr@acme.com");
        assert_eq!(output.account.user_type, UserType::Company);

        let created = repo.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].password_hash, "hashed:password123");
        assert_eq!(created[0].company_name.as_deref(), Some("Acme"));
        assert_eq!(created[0].sector.as_deref(), Some("Logistics"));
        assert_eq!(notifier.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_email_taken() {
        let repo = MockAccountRepository {
            taken: true,
            ..Default::default()
        };
        let service = SignUpService::new(repo, Arc::new(PlainHasher), CountingNotifier::new(0));

        let result = service.execute(company_command()).await;

        assert!(matches!(result, Err(SignUpError::EmailTaken)));
    }

    #[tokio::test]
    async fn welcome_email_is_retried_then_abandoned() {
        let notifier = CountingNotifier::new(u32::MAX);
        let service = SignUpService::new(
            MockAccountRepository::default(),
            Arc::new(PlainHasher),
            notifier.clone(),
        )
        .with_retry_base(Duration::from_millis(1));

        let result = service.execute(company_command()).await;
        notifier.done.notified().await;

        assert!(result.is_ok(), "email failure must not fail sign up");
        assert_eq!(
            notifier.attempts.load(Ordering::SeqCst),
            WELCOME_EMAIL_ATTEMPTS
        );
    }
}
