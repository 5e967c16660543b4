use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use sha2::{Digest, Sha256};

use crate::auth::application::ports::outgoing::{TokenBlacklist, TokenBlacklistError};

const KEY_PREFIX: &str = "revoked_token:";

/// Stores a SHA-256 of each revoked token with a TTL equal to the token's remaining lifetime.
#[derive(Clone)]
pub struct RedisTokenBlacklist {
    conn: ConnectionManager,
}

impl RedisTokenBlacklist {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

pub fn blacklist_key(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}{}", KEY_PREFIX, hex)
}

#[async_trait]
impl TokenBlacklist for RedisTokenBlacklist {
    async fn revoke(&self, token: &str, ttl_seconds: u64) -> Result<(), TokenBlacklistError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(blacklist_key(token), 1, ttl_seconds)
            .await
            .map_err(|e| TokenBlacklistError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, TokenBlacklistError> {
        let mut conn = self.conn.clone();
        conn.exists(blacklist_key(token))
            .await
            .map_err(|e| TokenBlacklistError::Unavailable(e.to_string()))
    }
}
