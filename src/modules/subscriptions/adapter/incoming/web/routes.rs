use actix_web::{get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::{AuditEntry, Permission};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::shared::listing::ListQuery;
use crate::subscriptions::application::domain::SubscriptionStatus;
use crate::subscriptions::application::ports::incoming::SubscriptionError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub user_id: Uuid,
    pub plan_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionStatusRequest {
    pub status: SubscriptionStatus,
}

#[derive(Debug, Serialize)]
pub struct ServiceAccess {
    pub service: String,
    pub has_access: bool,
}

#[get("/api/subscriptions/plans")]
pub async fn list_plans_handler(data: web::Data<AppState>) -> impl Responder {
    match data.subscription_use_case.list_plans().await {
        Ok(plans) => ApiResponse::success(plans),
        Err(e) => map_subscription_error(e),
    }
}

#[get("/api/subscriptions/access/{service}")]
pub async fn check_service_access_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let service = path.into_inner();
    match data
        .subscription_use_case
        .check_service_access(user.user_id, &service)
        .await
    {
        Ok(has_access) => ApiResponse::success(ServiceAccess {
            service,
            has_access,
        }),
        Err(e) => map_subscription_error(e),
    }
}

#[get("/api/admin/subscriptions")]
pub async fn list_subscriptions_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    if let Err(resp) = require_permission(
        data.permission_checker.as_ref(),
        &user,
        Permission::ManageSubscriptions,
    )
    .await
    {
        return resp;
    }

    match data.subscription_use_case.list(query.into_inner()).await {
        Ok(subscriptions) => ApiResponse::success(subscriptions),
        Err(e) => map_subscription_error(e),
    }
}

#[post("/api/admin/subscriptions")]
pub async fn create_subscription_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<CreateSubscriptionRequest>,
) -> impl Responder {
    if let Err(resp) = require_permission(
        data.permission_checker.as_ref(),
        &user,
        Permission::ManageSubscriptions,
    )
    .await
    {
        return resp;
    }

    let dto = payload.into_inner();
    match data
        .subscription_use_case
        .create(dto.user_id, dto.plan_id)
        .await
    {
        Ok(subscription) => {
            data.audit_logger.log_action(
                AuditEntry::new(
                    user.user_id,
                    "create_subscription",
                    "subscription",
                    Some(subscription.id),
                )
                .with_details(json!({
                    "user_id": subscription.user_id,
                    "plan": subscription.plan_name,
                })),
            );
            ApiResponse::created(subscription)
        }
        Err(e) => map_subscription_error(e),
    }
}

#[put("/api/admin/subscriptions/{id}/status")]
pub async fn change_subscription_status_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<SubscriptionStatusRequest>,
) -> impl Responder {
    if let Err(resp) = require_permission(
        data.permission_checker.as_ref(),
        &user,
        Permission::ManageSubscriptions,
    )
    .await
    {
        return resp;
    }

    let id = path.into_inner();
    let next = payload.status;
    match data.subscription_use_case.change_status(id, next).await {
        Ok(subscription) => {
            data.audit_logger.log_action(
                AuditEntry::new(
                    user.user_id,
                    "update_subscription_status",
                    "subscription",
                    Some(id),
                )
                .with_details(json!({ "status": next, "end_date": subscription.end_date })),
            );
            ApiResponse::success(subscription)
        }
        Err(e) => map_subscription_error(e),
    }
}

fn map_subscription_error(err: SubscriptionError) -> HttpResponse {
    match err {
        SubscriptionError::PlanNotFound => {
            ApiResponse::not_found("PLAN_NOT_FOUND", "Subscription plan not found")
        }
        SubscriptionError::PlanInactive => {
            ApiResponse::unprocessable("PLAN_INACTIVE", &err.to_string())
        }
        SubscriptionError::NotFound => {
            ApiResponse::not_found("SUBSCRIPTION_NOT_FOUND", "Subscription not found")
        }
        SubscriptionError::InvalidTransition(e) => {
            ApiResponse::unprocessable("INVALID_TRANSITION", &e.to_string())
        }
        SubscriptionError::StatusChanged => {
            ApiResponse::conflict("STATUS_CHANGED", &err.to_string())
        }
        SubscriptionError::Internal(msg) => {
            tracing::error!("Subscription operation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserType;
    use crate::subscriptions::application::ports::incoming::MockSubscriptionUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, stub_token_provider};
    use crate::tests::support::stubs::GrantOnly;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn access_check_reports_service_and_answer() {
        let user_id = Uuid::new_v4();
        let mut subscriptions = MockSubscriptionUseCase::new();
        subscriptions
            .expect_check_service_access()
            .withf(move |id, service| *id == user_id && service == "cv_search")
            .returning(|_, _| Ok(true));
        let state = TestAppStateBuilder::default()
            .with_subscriptions(subscriptions)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(user_id, UserType::Company)))
                .service(check_service_access_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/subscriptions/access/cv_search")
            .insert_header(bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["service"], "cv_search");
        assert_eq!(json["data"]["has_access"], true);
    }

    #[actix_web::test]
    async fn unknown_status_value_is_a_validation_error() {
        let mut subscriptions = MockSubscriptionUseCase::new();
        subscriptions.expect_change_status().never();
        let state = TestAppStateBuilder::default()
            .with_permissions(GrantOnly(vec![Permission::ManageSubscriptions]))
            .with_subscriptions(subscriptions)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(crate::shared::api::custom_json_config())
                .app_data(web::Data::new(stub_token_provider(Uuid::new_v4(), UserType::Admin)))
                .service(change_subscription_status_handler),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/admin/subscriptions/{}/status", Uuid::new_v4()))
            .insert_header(bearer())
            .set_json(json!({ "status": "paused" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }
}
