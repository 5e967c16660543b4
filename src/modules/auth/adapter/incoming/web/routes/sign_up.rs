use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::{
    domain::entities::UserType,
    ports::incoming::{SignUpCommand, SignUpCommandError, SignUpError, SignUpOutput},
};
use crate::shared::api::ApiResponse;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUpRequest {
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "CorrectHorse42")]
    pub password: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    pub user_type: UserType,
    /// Required when `user_type` is `company`
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub phone: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Route
// ──────────────────────────────────────────────────────────
//

/// Create an account
///
/// Creates the profile and its company or candidate row in one transaction.
#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    tag = "auth",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<SignUpOutput>)),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Registration is closed", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/sign-up")]
pub async fn sign_up_handler(
    data: web::Data<AppState>,
    payload: web::Json<SignUpRequest>,
) -> impl Responder {
    let dto = payload.into_inner();

    let command = match SignUpCommand::new(
        dto.email,
        dto.password,
        dto.name,
        dto.user_type,
        dto.company_name,
        dto.sector,
        dto.phone,
    ) {
        Ok(cmd) => cmd,
        Err(err) => return map_command_error(err),
    };

    match data.settings_use_case.policy().await {
        Ok(policy) if policy.registration_open => {}
        Ok(_) => {
            return ApiResponse::forbidden(
                "REGISTRATION_CLOSED",
                "New accounts cannot be created at the moment",
            )
        }
        Err(e) => {
            tracing::error!("Reading site policy failed: {}", e);
            return ApiResponse::internal_error();
        }
    }

    match data.sign_up_use_case.execute(command).await {
        Ok(output) => ApiResponse::created(output),
        Err(err) => map_sign_up_error(err),
    }
}

//
// ──────────────────────────────────────────────────────────
// Error Mapping
// ──────────────────────────────────────────────────────────
//

fn map_command_error(err: SignUpCommandError) -> HttpResponse {
    let code = match err {
        SignUpCommandError::EmptyEmail | SignUpCommandError::InvalidEmailFormat => "INVALID_EMAIL",
        SignUpCommandError::PasswordTooShort => "WEAK_PASSWORD",
        SignUpCommandError::EmptyName | SignUpCommandError::MissingCompanyName => "MISSING_FIELD",
        SignUpCommandError::AdminNotAllowed => "INVALID_USER_TYPE",
    };
    ApiResponse::bad_request(code, &err.to_string())
}

fn map_sign_up_error(err: SignUpError) -> HttpResponse {
    match err {
        SignUpError::EmailTaken => {
            ApiResponse::conflict("EMAIL_TAKEN", "An account with this email already exists")
        }
        SignUpError::Internal(msg) => {
            tracing::error!("Sign up failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::Account;
    use crate::auth::application::ports::incoming::SignUpUseCase;
    use crate::settings::application::domain::SitePolicy;
    use crate::settings::application::ports::incoming::MockSettingsUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    struct FakeSignUp {
        result: Result<(), SignUpError>,
    }

    #[async_trait]
    impl SignUpUseCase for FakeSignUp {
        async fn execute(&self, command: SignUpCommand) -> Result<SignUpOutput, SignUpError> {
            self.result.clone()?;
            Ok(SignUpOutput {
                account: Account {
                    id: Uuid::new_v4(),
                    email: command.email().to_string(),
                    name: command.name().to_string(),
                    user_type: command.user_type(),
                    is_active: true,
                    email_verified: false,
                    created_at: Utc::now(),
                },
                message: "Account created successfully.".to_string(),
            })
        }
    }

    fn registration(open: bool) -> MockSettingsUseCase {
        let mut settings = MockSettingsUseCase::new();
        settings.expect_policy().returning(move || {
            Ok(SitePolicy {
                registration_open: open,
                ..Default::default()
            })
        });
        settings
    }

    async fn call(result: Result<(), SignUpError>, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        call_with(registration(true), result, body).await
    }

    async fn call_with(
        settings: MockSettingsUseCase,
        result: Result<(), SignUpError>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let state = TestAppStateBuilder::default()
            .with_sign_up(FakeSignUp { result })
            .with_settings(settings)
            .build();
        let app = test::init_service(App::new().app_data(state).service(sign_up_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/sign-up")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn company_sign_up_returns_created() {
        let (status, json) = call(
            Ok(()),
            serde_json::json!({
                "email": "HR@acme.com",
                "password": "password123",
                "name": "Acme HR",
                "user_type": "company",
                "company_name": "Acme"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["account"]["email"], "hr@acme.com");
        assert_eq!(json["data"]["account"]["user_type"], "company");
    }

    #[actix_web::test]
    async fn admin_sign_up_is_rejected() {
        let (status, json) = call(
            Ok(()),
            serde_json::json!({
                "email": "boss@example.com",
                "password": "password123",
                "name": "Boss",
                "user_type": "admin"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_USER_TYPE");
    }

    #[actix_web::test]
    async fn duplicate_email_is_conflict() {
        let (status, json) = call(
            Err(SignUpError::EmailTaken),
            serde_json::json!({
                "email": "jane@example.com",
                "password": "password123",
                "name": "Jane",
                "user_type": "candidate"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "EMAIL_TAKEN");
    }

    #[actix_web::test]
    async fn internal_error_is_not_leaked() {
        let (status, json) = call(
            Err(SignUpError::Internal("pool timed out".to_string())),
            serde_json::json!({
                "email": "jane@example.com",
                "password": "password123",
                "name": "Jane",
                "user_type": "student"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["message"], "An unexpected error occurred");
    }

    #[actix_web::test]
    async fn closed_registration_is_forbidden() {
        let (status, json) = call_with(
            registration(false),
            Ok(()),
            serde_json::json!({
                "email": "jane@example.com",
                "password": "password123",
                "name": "Jane",
                "user_type": "candidate"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"]["code"], "REGISTRATION_CLOSED");
    }
}
