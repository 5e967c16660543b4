use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::auth::application::ports::{
    incoming::{SignOutError, SignOutUseCase},
    outgoing::{TokenBlacklist, TokenProvider},
};

#[derive(Clone)]
pub struct SignOutService {
    tokens: Arc<dyn TokenProvider>,
    blacklist: Arc<dyn TokenBlacklist>,
}

impl SignOutService {
    pub fn new(tokens: Arc<dyn TokenProvider>, blacklist: Arc<dyn TokenBlacklist>) -> Self {
        Self { tokens, blacklist }
    }
}

#[async_trait]
impl SignOutUseCase for SignOutService {
    async fn execute(&self, access_token: &str) -> Result<(), SignOutError> {
        let claims = self
            .tokens
            .verify_token(access_token)
            .map_err(|_| SignOutError::InvalidToken)?;

        let remaining = (claims.exp - Utc::now().timestamp()).max(1) as u64;

        self.blacklist
            .revoke(access_token, remaining)
            .await
            .map_err(|e| SignOutError::Internal(e.to_string()))?;

        tracing::info!("User {} signed out", claims.sub);
        Ok(())
    }
}
