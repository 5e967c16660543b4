use async_trait::async_trait;
use email_address::EmailAddress;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::{Account, UserType};

pub const MIN_PASSWORD_LENGTH: usize = 8;
const DEFAULT_SECTOR: &str = "other";

//
// ──────────────────────────────────────────────────────────
// Sign Up Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct SignUpCommand {
    email: String,
    password: String,
    name: String,
    user_type: UserType,
    company_name: Option<String>,
    sector: Option<String>,
    phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignUpCommandError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Admin accounts cannot be self-registered")]
    AdminNotAllowed,

    #[error("Company name is required for company accounts")]
    MissingCompanyName,
}

impl SignUpCommand {
    pub fn new(
        email: String,
        password: String,
        name: String,
        user_type: UserType,
        company_name: Option<String>,
        sector: Option<String>,
        phone: Option<String>,
    ) -> Result<Self, SignUpCommandError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(SignUpCommandError::EmptyEmail);
        }
        if !EmailAddress::is_valid(&email) {
            return Err(SignUpCommandError::InvalidEmailFormat);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SignUpCommandError::PasswordTooShort);
        }

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(SignUpCommandError::EmptyName);
        }

        if !user_type.is_self_selectable() {
            return Err(SignUpCommandError::AdminNotAllowed);
        }

        let company_name = non_blank(company_name);
        let sector = non_blank(sector);
        if user_type == UserType::Company && company_name.is_none() {
            return Err(SignUpCommandError::MissingCompanyName);
        }

        Ok(Self {
            email,
            password,
            name,
            user_type,
            company_name,
            sector,
            phone: non_blank(phone),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    /// Sector of the company row; companies signing up without one get "other".
    pub fn sector(&self) -> Option<String> {
        match self.user_type {
            UserType::Company => Some(
                self.sector
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SECTOR.to_string()),
            ),
            _ => None,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

//
// ──────────────────────────────────────────────────────────
// Output / Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignUpOutput {
    pub account: Account,
    pub message: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SignUpError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignUpUseCase: Send + Sync {
    async fn execute(&self, command: SignUpCommand) -> Result<SignUpOutput, SignUpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(user_type: UserType, company: Option<&str>) -> Result<SignUpCommand, SignUpCommandError> {
        SignUpCommand::new(
            "  Jane@Example.com ".to_string(),
            "password123".to_string(),
            " Jane ".to_string(),
            user_type,
            company.map(str::to_string),
            None,
            None,
        )
    }

    #[test]
    fn normalizes_email_and_name() {
        let cmd = command(UserType::Candidate, None).unwrap();

        assert_eq!(cmd.email(), "jane@example.com");
        assert_eq!(cmd.name(), "Jane");
        assert_eq!(cmd.sector(), None);
    }

    #[test]
    fn rejects_short_password() {
        let err = SignUpCommand::new(
            "jane@example.com".to_string(),
            "short".to_string(),
            "Jane".to_string(),
            UserType::Candidate,
            None,
            None,
            None,
        )
        .unwrap_err();

        assert_eq!(err, SignUpCommandError::PasswordTooShort);
    }

    #[test]
    fn rejects_admin_self_registration() {
        assert_eq!(
            command(UserType::Admin, None).unwrap_err(),
            SignUpCommandError::AdminNotAllowed
        );
    }

    #[test]
    fn company_requires_company_name() {
        assert_eq!(
            command(UserType::Company, Some("   ")).unwrap_err(),
            SignUpCommandError::MissingCompanyName
        );
    }

    #[test]
    fn company_gets_default_sector() {
        let cmd = command(UserType::Company, Some("Acme")).unwrap();

        assert_eq!(cmd.company_name(), Some("Acme"));
        assert_eq!(cmd.sector().as_deref(), Some("other"));
    }

    #[test]
    fn rejects_invalid_email() {
        let err = SignUpCommand::new(
            "not-an-email".to_string(),
            "password123".to_string(),
            "Jane".to_string(),
            UserType::Student,
            None,
            None,
            None,
        )
        .unwrap_err();

        assert_eq!(err, SignUpCommandError::InvalidEmailFormat);
    }
}
