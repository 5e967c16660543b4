use actix_web::{get, post, web, Responder};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::roles::map_role_error;
use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::{AuditEntry, Permission};
use crate::admin::application::ports::incoming::AppointAdministratorCommand;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AppointAdministratorRequest {
    pub user_id: Uuid,
    pub role_id: Uuid,
}

#[get("/api/admin/administrators")]
pub async fn list_administrators_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageAdmins).await
    {
        return resp;
    }

    match data.admin_role_use_case.list_administrators().await {
        Ok(admins) => ApiResponse::success(admins),
        Err(e) => map_role_error(e),
    }
}

#[post("/api/admin/administrators")]
pub async fn appoint_administrator_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<AppointAdministratorRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageAdmins).await
    {
        return resp;
    }

    let dto = payload.into_inner();
    let command = AppointAdministratorCommand {
        user_id: dto.user_id,
        role_id: dto.role_id,
    };

    match data.admin_role_use_case.appoint_administrator(command).await {
        Ok(admin) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "appoint_administrator", "administrator", Some(admin.id))
                    .with_details(json!({ "user_id": admin.user_id, "role_id": admin.role_id })),
            );
            ApiResponse::created(admin)
        }
        Err(e) => map_role_error(e),
    }
}

#[post("/api/admin/administrators/{id}/deactivate")]
pub async fn deactivate_administrator_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageAdmins).await
    {
        return resp;
    }

    let id = path.into_inner();
    match data.admin_role_use_case.deactivate_administrator(id).await {
        Ok(admin) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "deactivate_administrator", "administrator", Some(id))
                    .with_details(json!({ "user_id": admin.user_id })),
            );
            ApiResponse::success(admin)
        }
        Err(e) => map_role_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::application::domain::Administrator;
    use crate::admin::application::ports::incoming::{AdminRoleError, MockAdminRoleUseCase};
    use crate::auth::application::domain::entities::UserType;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, stub_token_provider};
    use crate::tests::support::stubs::{GrantOnly, RecordingAuditLogger};
    use actix_web::{http::StatusCode, test, App};
    use chrono::Utc;
    use std::sync::Arc;

    #[actix_web::test]
    async fn appoint_returns_created_and_logs() {
        let mut roles = MockAdminRoleUseCase::new();
        roles.expect_appoint_administrator().returning(|cmd| {
            Ok(Administrator {
                id: Uuid::new_v4(),
                user_id: cmd.user_id,
                role_id: cmd.role_id,
                is_active: true,
                created_at: Utc::now(),
            })
        });
        let audit = Arc::new(RecordingAuditLogger::default());
        let state = TestAppStateBuilder::default()
            .with_permissions(GrantOnly(vec![Permission::ManageAdmins]))
            .with_admin_roles(roles)
            .with_audit_logger(audit.clone())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(Uuid::new_v4(), UserType::Admin)))
                .service(appoint_administrator_handler),
        )
        .await;

        let target = Uuid::new_v4();
        let req = test::TestRequest::post()
            .uri("/api/admin/administrators")
            .insert_header(bearer())
            .set_json(json!({ "user_id": target, "role_id": Uuid::new_v4() }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(audit.entries()[0].action_type, "appoint_administrator");
    }

    #[actix_web::test]
    async fn already_admin_is_conflict_and_not_logged() {
        let mut roles = MockAdminRoleUseCase::new();
        roles
            .expect_appoint_administrator()
            .returning(|_| Err(AdminRoleError::AlreadyAdministrator));
        let audit = Arc::new(RecordingAuditLogger::default());
        let state = TestAppStateBuilder::default()
            .with_permissions(GrantOnly(vec![Permission::ManageAdmins]))
            .with_admin_roles(roles)
            .with_audit_logger(audit.clone())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(Uuid::new_v4(), UserType::Admin)))
                .service(appoint_administrator_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/admin/administrators")
            .insert_header(bearer())
            .set_json(json!({ "user_id": Uuid::new_v4(), "role_id": Uuid::new_v4() }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert!(audit.entries().is_empty());
    }
}
