use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::ports::{
    incoming::{SignInCommand, SignInError, SignInOutput, SignInUseCase},
    outgoing::{AccountRepository, PasswordHasher, TokenProvider},
};

#[derive(Clone)]
pub struct SignInService<R>
where
    R: AccountRepository,
{
    repository: R,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenProvider>,
}

impl<R> SignInService<R>
where
    R: AccountRepository,
{
    pub fn new(repository: R, hasher: Arc<dyn PasswordHasher>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<R> SignInUseCase for SignInService<R>
where
    R: AccountRepository,
{
    async fn execute(&self, command: SignInCommand) -> Result<SignInOutput, SignInError> {
        let credentials = self
            .repository
            .find_credentials(command.email())
            .await
            .map_err(|e| SignInError::Internal(e.to_string()))?
            .ok_or(SignInError::InvalidCredentials)?;

        let matches = self
            .hasher
            .verify_password(command.password(), &credentials.password_hash)
            .await
            .map_err(|e| SignInError::Internal(e.to_string()))?;

        if !matches {
            return Err(SignInError::InvalidCredentials);
        }

        let account = credentials.account;
        if !account.is_active {
            tracing::info!("Sign-in refused for deactivated account {}", account.id);
            return Err(SignInError::AccountDisabled);
        }

        let access_token = self
            .tokens
            .generate_access_token(account.id, account.user_type, account.email_verified)
            .map_err(|e| SignInError::Internal(e.to_string()))?;

        Ok(SignInOutput {
            access_token,
            token_type: "Bearer".to_string(),
            account,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{Account, AccountCredentials, UserType};
    use crate::auth::application::ports::outgoing::{
        AccountRepositoryError, HashError, NewAccount, TokenClaims, TokenError,
    };
    use chrono::Utc;
    use uuid::Uuid;

    #[derive(Clone)]
    struct MockAccountRepository {
        credentials: Option<AccountCredentials>,
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn create_account(
            &self,
            _account: NewAccount,
        ) -> Result<Account, AccountRepositoryError> {
            unimplemented!("Not used in sign in tests")
        }

        async fn find_credentials(
            &self,
            _email: &str,
        ) -> Result<Option<AccountCredentials>, AccountRepositoryError> {
            Ok(self.credentials.clone())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Account>, AccountRepositoryError> {
            unimplemented!("Not used in sign in tests")
        }
    }

    struct PlainHasher;

    #[async_trait]
    impl PasswordHasher for PlainHasher {
        async fn hash_password(&self, _password: &str) -> Result<String, HashError> {
            unimplemented!("Not used in sign in tests")
        }

        async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    struct FixedTokenProvider;

    impl TokenProvider for FixedTokenProvider {
        fn generate_access_token(
            &self,
            user_id: Uuid,
            user_type: UserType,
            _is_verified: bool,
        ) -> Result<String, TokenError> {
            Ok(format!("token-{}-{}", user_type, user_id))
        }

        fn verify_token(&self, _token: &str) -> Result<TokenClaims, TokenError> {
            unimplemented!("Not used in sign in tests")
        }
    }

    fn stored(is_active: bool) -> AccountCredentials {
        AccountCredentials {
            account: Account {
                id: Uuid::new_v4(),
                email: "jane@example.com".to_string(),
                name: "Jane".to_string(),
                user_type: UserType::Candidate,
                is_active,
                email_verified: true,
                created_at: Utc::now(),
            },
            password_hash: "hashed:password123".to_string(),
        }
    }

    fn service(credentials: Option<AccountCredentials>) -> SignInService<MockAccountRepository> {
        SignInService::new(
            MockAccountRepository { credentials },
            Arc::new(PlainHasher),
            Arc::new(FixedTokenProvider),
        )
    }

    fn command(password: &str) -> SignInCommand {
        SignInCommand::new("jane@example.com".to_string(), password.to_string()).unwrap()
    }

    #[tokio::test]
    async fn issues_token_for_valid_credentials() {
        let creds = stored(true);
        let id = creds.account.id;

        let output = service(Some(creds)).execute(command("password123")).await.unwrap();

        assert_eq!(output.access_token, format!("token-candidate-{}", id));
        assert_eq!(output.token_type, "Bearer");
        assert_eq!(output.account.id, id);
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let result = service(None).execute(command("password123")).await;
        assert!(matches!(result, Err(SignInError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let result = service(Some(stored(true))).execute(command("nope")).await;
        assert!(matches!(result, Err(SignInError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn deactivated_account_is_refused() {
        let result = service(Some(stored(false))).execute(command("password123")).await;
        assert!(matches!(result, Err(SignInError::AccountDisabled)));
    }
}
