use actix_web::{get, web, Responder};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::Account;
use crate::auth::application::ports::incoming::CurrentUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Current user
///
/// Profile of the bearer; 401 when there is no session.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current profile", body = inline(SuccessResponse<Account>)),
        (status = 401, description = "No session", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
#[get("/api/auth/me")]
pub async fn current_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.current_user_use_case.execute(user.user_id).await {
        Ok(account) => ApiResponse::success(account),
        // Token outlived its profile
        Err(CurrentUserError::NotFound) => {
            ApiResponse::unauthorized("NO_SESSION", "No active session")
        }
        Err(CurrentUserError::Internal(msg)) => {
            tracing::error!("Loading current user failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
