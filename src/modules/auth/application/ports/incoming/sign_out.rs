use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SignOutError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignOutUseCase: Send + Sync {
    /// Revokes the given access token until it expires.
    async fn execute(&self, access_token: &str) -> Result<(), SignOutError>;
}
