use actix_web::{get, web, Responder};

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::Permission;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::dashboard::application::ports::incoming::DashboardError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[get("/api/admin/dashboard")]
pub async fn dashboard_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ViewDashboard)
            .await
    {
        return resp;
    }

    match data.dashboard_use_case.stats().await {
        Ok(stats) => ApiResponse::success(stats),
        Err(DashboardError::Internal(msg)) => {
            tracing::error!("Dashboard computation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserType;
    use crate::dashboard::application::domain::DashboardStats;
    use crate::dashboard::application::ports::incoming::MockDashboardUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, stub_token_provider};
    use crate::tests::support::stubs::GrantOnly;
    use actix_web::{http::StatusCode, test, App};
    use uuid::Uuid;

    #[actix_web::test]
    async fn moderator_without_permission_is_refused() {
        let mut dashboard = MockDashboardUseCase::new();
        dashboard.expect_stats().never();
        let state = TestAppStateBuilder::default()
            .with_permissions(GrantOnly(vec![Permission::ManageJobs]))
            .with_dashboard(dashboard)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(Uuid::new_v4(), UserType::Admin)))
                .service(dashboard_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/admin/dashboard")
            .insert_header(bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn returns_computed_stats() {
        let mut dashboard = MockDashboardUseCase::new();
        dashboard.expect_stats().returning(|| {
            let mut stats = DashboardStats::default();
            stats.jobs.total = 4;
            stats.jobs.active = 3;
            stats.payments.revenue.insert("EUR".to_string(), 12_500);
            Ok(stats)
        });
        let state = TestAppStateBuilder::default()
            .with_permissions(GrantOnly(vec![Permission::ViewDashboard]))
            .with_dashboard(dashboard)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(Uuid::new_v4(), UserType::Admin)))
                .service(dashboard_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/admin/dashboard")
            .insert_header(bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["jobs"]["active"], 3);
        assert_eq!(json["data"]["payments"]["revenue"]["EUR"], 12_500);
    }
}
