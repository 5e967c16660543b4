use actix_web::{post, web, HttpRequest, Responder};

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::{bearer_token, AuthenticatedUser};
use crate::auth::application::ports::incoming::SignOutError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Sign out
///
/// Revokes the presented access token.
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    tag = "auth",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/auth/sign-out")]
pub async fn sign_out_handler(
    _user: AuthenticatedUser,
    req: HttpRequest,
    data: web::Data<AppState>,
) -> impl Responder {
    let Some(token) = bearer_token(&req) else {
        return ApiResponse::unauthorized("MISSING_AUTH_HEADER", "Missing or invalid authorization header");
    };

    match data.sign_out_use_case.execute(&token).await {
        Ok(()) => ApiResponse::no_content(),
        Err(SignOutError::InvalidToken) => {
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired token")
        }
        Err(SignOutError::Internal(msg)) => {
            tracing::error!("Sign out failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
