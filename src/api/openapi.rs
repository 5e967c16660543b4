use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::admin::application::domain::{AdminRole, Administrator, Permission};
use crate::auth::adapter::incoming::web::routes::{SignInRequest, SignUpRequest};
use crate::auth::application::domain::entities::{Account, UserType};
use crate::auth::application::ports::incoming::{SignInOutput, SignUpOutput};
use crate::candidates::application::domain::Candidate;
use crate::companies::application::domain::Company;
use crate::jobs::application::domain::{Job, JobType};
use crate::payments::application::domain::{Payment, PaymentStatus};
use crate::subscriptions::application::domain::{SubscriptionPlan, SubscriptionStatus};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recruitment Platform API",
        version = "1.0.0",
        description = "Accounts, job offers, applications and the administration back-office",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        crate::auth::adapter::incoming::web::routes::sign_up::sign_up_handler,
        crate::auth::adapter::incoming::web::routes::sign_in::sign_in_handler,
        crate::auth::adapter::incoming::web::routes::sign_out::sign_out_handler,
        crate::auth::adapter::incoming::web::routes::current_user::current_user_handler,
    ),
    components(
        schemas(
            SuccessResponse<Account>,
            ErrorResponse,
            ErrorDetail,

            SignUpRequest,
            SignUpOutput,
            SignInRequest,
            SignInOutput,
            Account,
            UserType,

            Permission,
            AdminRole,
            Administrator,
            Company,
            Candidate,
            Job,
            JobType,
            Payment,
            PaymentStatus,
            SubscriptionPlan,
            SubscriptionStatus
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-up, sign-in and session endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/sign-in"))
                        .build(),
                ),
            )
        }
    }
}
