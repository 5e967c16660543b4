use actix_web::{get, web, Responder};

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::Permission;
use crate::admin::application::ports::{incoming::AdminLogError, outgoing::AdminLogFilter};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[get("/api/admin/logs")]
pub async fn list_admin_logs_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    query: web::Query<AdminLogFilter>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ViewLogs).await
    {
        return resp;
    }

    match data.admin_log_use_case.list_logs(query.into_inner()).await {
        Ok(logs) => ApiResponse::success(logs),
        Err(AdminLogError::Internal(msg)) => {
            tracing::error!("Listing admin logs failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::application::ports::incoming::MockAdminLogUseCase;
    use crate::auth::application::domain::entities::UserType;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, stub_token_provider};
    use crate::tests::support::stubs::GrantOnly;
    use actix_web::{http::StatusCode, test, App};
    use uuid::Uuid;

    #[actix_web::test]
    async fn query_string_reaches_use_case() {
        let mut logs = MockAdminLogUseCase::new();
        logs.expect_list_logs()
            .withf(|f| f.action_type.as_deref() == Some("refund_payment") && f.limit == Some(20))
            .times(1)
            .returning(|_| Ok(vec![]));
        let state = TestAppStateBuilder::default()
            .with_permissions(GrantOnly(vec![Permission::ViewLogs]))
            .with_admin_logs(logs)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(Uuid::new_v4(), UserType::Admin)))
                .service(list_admin_logs_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/admin/logs?action_type=refund_payment&limit=20")
            .insert_header(bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn requires_view_logs() {
        let state = TestAppStateBuilder::default()
            .with_permissions(GrantOnly(vec![Permission::ManageAdmins]))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(Uuid::new_v4(), UserType::Admin)))
                .service(list_admin_logs_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/admin/logs")
            .insert_header(bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
