use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::ports::incoming::{SignInCommand, SignInError, SignInOutput};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "CorrectHorse42")]
    pub password: String,
}

/// Sign in
///
/// Exchanges email and password for a bearer access token.
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    tag = "auth",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = inline(SuccessResponse<SignInOutput>)),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account disabled", body = ErrorResponse),
    )
)]
#[post("/api/auth/sign-in")]
pub async fn sign_in_handler(
    data: web::Data<AppState>,
    payload: web::Json<SignInRequest>,
) -> impl Responder {
    let dto = payload.into_inner();
    tracing::info!(email = %dto.email, "Sign-in attempt");

    let command = match SignInCommand::new(dto.email, dto.password) {
        Ok(cmd) => cmd,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.sign_in_use_case.execute(command).await {
        Ok(output) => ApiResponse::success(output),
        Err(err) => map_sign_in_error(err),
    }
}

fn map_sign_in_error(err: SignInError) -> HttpResponse {
    match err {
        SignInError::InvalidCredentials => {
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }
        SignInError::AccountDisabled => {
            ApiResponse::forbidden("ACCOUNT_DISABLED", "This account has been deactivated")
        }
        SignInError::Internal(msg) => {
            tracing::error!("Sign in failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
