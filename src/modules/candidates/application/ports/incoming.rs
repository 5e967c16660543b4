use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::candidates::application::domain::Candidate;
use crate::shared::listing::ListQuery;

static HTTP_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("http url regex is valid")
});

fn is_http_url(candidate: &str) -> bool {
    HTTP_URL_REGEX.is_match(candidate)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateCandidateCommandError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("CV link must be an http(s) URL")]
    InvalidCvUrl,

    #[error("Nothing to update")]
    NoChanges,
}

/// Absent fields stay unchanged; an empty string clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCandidateCommand {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub cv_url: Option<String>,
}

impl UpdateCandidateCommand {
    pub fn new(
        name: Option<String>,
        phone: Option<String>,
        description: Option<String>,
        cv_url: Option<String>,
    ) -> Result<Self, UpdateCandidateCommandError> {
        if name.is_none() && phone.is_none() && description.is_none() && cv_url.is_none() {
            return Err(UpdateCandidateCommandError::NoChanges);
        }

        let name = match name.map(|n| n.trim().to_string()) {
            Some(n) if n.is_empty() => return Err(UpdateCandidateCommandError::EmptyName),
            other => other,
        };

        let cv_url = cv_url.map(|u| u.trim().to_string());
        if let Some(url) = cv_url.as_deref() {
            if !url.is_empty() && !is_http_url(url) {
                return Err(UpdateCandidateCommandError::InvalidCvUrl);
            }
        }

        Ok(Self {
            name,
            phone: phone.map(|p| p.trim().to_string()),
            description: description.map(|d| d.trim().to_string()),
            cv_url,
        })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CandidateError {
    #[error("Candidate profile not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateUseCase: Send + Sync {
    async fn list(&self, query: ListQuery) -> Result<Vec<Candidate>, CandidateError>;

    async fn get_own(&self, user_id: Uuid) -> Result<Candidate, CandidateError>;

    async fn update_own(
        &self,
        user_id: Uuid,
        command: UpdateCandidateCommand,
    ) -> Result<Candidate, CandidateError>;
}
