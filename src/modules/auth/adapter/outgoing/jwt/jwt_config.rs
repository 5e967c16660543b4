use std::env;

use crate::shared::config::ConfigError;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        // HS256 needs at least 32 bytes of key material
        if secret_key.len() < 32 {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                value: "<shorter than 32 characters>".to_string(),
            });
        }

        let raw_expiry = env::var("JWT_ACCESS_EXPIRY").unwrap_or_else(|_| "3600".to_string());
        let access_token_expiry = raw_expiry
            .parse::<i64>()
            .ok()
            .filter(|v| *v > 0 && *v <= 86400)
            .ok_or(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                value: raw_expiry.clone(),
            })?;

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "recruit".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
        })
    }
}
