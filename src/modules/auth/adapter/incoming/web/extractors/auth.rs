use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::{
    domain::entities::UserType,
    ports::outgoing::{AccountStatusLookup, TokenBlacklist, TokenProvider},
};
use crate::shared::api::ApiResponse;

/// Bearer of a valid, non-revoked access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub user_type: UserType,
    pub is_verified: bool,
}

impl AuthenticatedUser {
    /// 403 unless the account is one of `allowed`.
    pub fn require_type(&self, allowed: &[UserType]) -> Result<(), HttpResponse> {
        if allowed.contains(&self.user_type) {
            Ok(())
        } else {
            Err(ApiResponse::forbidden(
                "WRONG_ACCOUNT_TYPE",
                "This action is not available for your account type",
            ))
        }
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let provider = req
            .app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
            .cloned();
        // Absent in unit tests that do not exercise revocation
        let blacklist = req
            .app_data::<web::Data<Arc<dyn TokenBlacklist + Send + Sync>>>()
            .cloned();
        let accounts = req
            .app_data::<web::Data<Arc<dyn AccountStatusLookup + Send + Sync>>>()
            .cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let provider =
                provider.ok_or_else(|| create_api_error(ApiResponse::internal_error()))?;

            let token = token.ok_or_else(|| {
                create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))
            })?;

            let claims = provider.verify_token(&token).map_err(|_| {
                create_api_error(ApiResponse::unauthorized(
                    "INVALID_TOKEN",
                    "Invalid or expired token",
                ))
            })?;

            if let Some(blacklist) = blacklist {
                match blacklist.is_revoked(&token).await {
                    Ok(false) => {}
                    Ok(true) => {
                        return Err(create_api_error(ApiResponse::unauthorized(
                            "TOKEN_REVOKED",
                            "Token has been revoked",
                        )));
                    }
                    Err(e) => {
                        tracing::error!("Token blacklist lookup failed: {}", e);
                        return Err(create_api_error(ApiResponse::internal_error()));
                    }
                }
            }

            // Deactivation takes effect before the token expires
            if let Some(accounts) = accounts {
                match accounts.is_active(claims.sub).await {
                    Ok(true) => {}
                    Ok(false) => {
                        return Err(create_api_error(ApiResponse::forbidden(
                            "ACCOUNT_DISABLED",
                            "This account has been deactivated",
                        )));
                    }
                    Err(e) => {
                        tracing::error!("Account status lookup failed: {}", e);
                        return Err(create_api_error(ApiResponse::internal_error()));
                    }
                }
            }

            Ok(AuthenticatedUser {
                user_id: claims.sub,
                user_type: claims.user_type,
                is_verified: claims.is_verified,
            })
        })
    }
}
