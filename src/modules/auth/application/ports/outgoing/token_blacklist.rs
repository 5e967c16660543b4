use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenBlacklistError {
    #[error("Blacklist store unavailable: {0}")]
    Unavailable(String),
}

/// Revoked access tokens, remembered until they would have expired anyway.
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    async fn revoke(&self, token: &str, ttl_seconds: u64) -> Result<(), TokenBlacklistError>;
    async fn is_revoked(&self, token: &str) -> Result<bool, TokenBlacklistError>;
}
