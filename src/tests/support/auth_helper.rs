use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserType;
use crate::auth::application::ports::outgoing::{
    AccountRepositoryError, AccountStatusLookup, TokenBlacklist, TokenBlacklistError, TokenClaims,
    TokenError, TokenProvider,
};

/// Accepts any token and reports a fixed identity.
pub struct StubTokenProvider {
    pub user_id: Uuid,
    pub user_type: UserType,
}

impl TokenProvider for StubTokenProvider {
    fn generate_access_token(
        &self,
        _user_id: Uuid,
        _user_type: UserType,
        _is_verified: bool,
    ) -> Result<String, TokenError> {
        Ok("test-token".to_string())
    }

    fn verify_token(&self, _token: &str) -> Result<TokenClaims, TokenError> {
        let now = Utc::now().timestamp();
        Ok(TokenClaims {
            sub: self.user_id,
            exp: now + 3600,
            iat: now,
            nbf: now,
            token_type: "access".to_string(),
            user_type: self.user_type,
            is_verified: true,
        })
    }
}

pub fn stub_token_provider(
    user_id: Uuid,
    user_type: UserType,
) -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(StubTokenProvider { user_id, user_type })
}

/// Answers every revocation lookup with the wrapped flag.
pub struct StaticBlacklist(pub bool);

#[async_trait]
impl TokenBlacklist for StaticBlacklist {
    async fn revoke(&self, _token: &str, _ttl_seconds: u64) -> Result<(), TokenBlacklistError> {
        Ok(())
    }

    async fn is_revoked(&self, _token: &str) -> Result<bool, TokenBlacklistError> {
        Ok(self.0)
    }
}

/// Reports every account as active or inactive.
pub struct StaticAccountStatus(pub bool);

#[async_trait]
impl AccountStatusLookup for StaticAccountStatus {
    async fn is_active(&self, _user_id: Uuid) -> Result<bool, AccountRepositoryError> {
        Ok(self.0)
    }
}

pub fn bearer() -> (&'static str, &'static str) {
    ("Authorization", "Bearer test-token")
}
