use async_trait::async_trait;
use email_address::EmailAddress;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::Account;

/// Validated sign-in credentials.
#[derive(Debug, Clone)]
pub struct SignInCommand {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignInCommandError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl SignInCommand {
    pub fn new(email: String, password: String) -> Result<Self, SignInCommandError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SignInCommandError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(SignInCommandError::InvalidEmailFormat);
        }
        if password.is_empty() {
            return Err(SignInCommandError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignInOutput {
    pub access_token: String,
    pub token_type: String,
    pub account: Account,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SignInError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignInUseCase: Send + Sync {
    async fn execute(&self, command: SignInCommand) -> Result<SignInOutput, SignInError>;
}
