use actix_web::{get, patch, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::{AuditEntry, Permission};
use crate::admin::application::ports::incoming::{
    AdminRoleError, CreateRoleCommand, RoleCommandError, UpdateRoleCommand,
};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleRequest {
    pub name: Option<String>,
    pub permissions: Option<Vec<Permission>>,
    pub is_active: Option<bool>,
}

//
// ──────────────────────────────────────────────────────────
// Routes
// ──────────────────────────────────────────────────────────
//

#[get("/api/admin/roles")]
pub async fn list_roles_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageAdmins).await
    {
        return resp;
    }

    match data.admin_role_use_case.list_roles().await {
        Ok(roles) => ApiResponse::success(roles),
        Err(e) => map_role_error(e),
    }
}

#[post("/api/admin/roles")]
pub async fn create_role_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<RoleRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageAdmins).await
    {
        return resp;
    }

    let dto = payload.into_inner();
    let command = match CreateRoleCommand::new(
        dto.name.unwrap_or_default(),
        dto.permissions.unwrap_or_default(),
    ) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.admin_role_use_case.create_role(command).await {
        Ok(role) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "create_admin_role", "admin_role", Some(role.id))
                    .with_details(json!({ "name": role.name, "permissions": role.permissions.to_json() })),
            );
            ApiResponse::created(role)
        }
        Err(e) => map_role_error(e),
    }
}

#[patch("/api/admin/roles/{id}")]
pub async fn update_role_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<RoleRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageAdmins).await
    {
        return resp;
    }

    let role_id = path.into_inner();
    let dto = payload.into_inner();
    let command = match UpdateRoleCommand::new(dto.name, dto.permissions, dto.is_active) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.admin_role_use_case.update_role(role_id, command).await {
        Ok(role) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "update_admin_role", "admin_role", Some(role.id))
                    .with_details(json!({
                        "name": role.name,
                        "permissions": role.permissions.to_json(),
                        "is_active": role.is_active,
                    })),
            );
            ApiResponse::success(role)
        }
        Err(e) => map_role_error(e),
    }
}

//
// ──────────────────────────────────────────────────────────
// Error Mapping
// ──────────────────────────────────────────────────────────
//

fn map_command_error(err: RoleCommandError) -> HttpResponse {
    ApiResponse::bad_request("VALIDATION_ERROR", &err.to_string())
}

pub(super) fn map_role_error(err: AdminRoleError) -> HttpResponse {
    match err {
        AdminRoleError::RoleNotFound => ApiResponse::not_found("ROLE_NOT_FOUND", "Role not found"),
        AdminRoleError::AdministratorNotFound => {
            ApiResponse::not_found("ADMINISTRATOR_NOT_FOUND", "Administrator not found")
        }
        AdminRoleError::UserNotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        AdminRoleError::NameTaken => {
            ApiResponse::conflict("ROLE_NAME_TAKEN", "A role with this name already exists")
        }
        AdminRoleError::AlreadyAdministrator => {
            ApiResponse::conflict("ALREADY_ADMINISTRATOR", "User is already an administrator")
        }
        AdminRoleError::RoleInactive => {
            ApiResponse::unprocessable("ROLE_INACTIVE", "Cannot appoint into an inactive role")
        }
        AdminRoleError::Internal(msg) => {
            tracing::error!("Admin role operation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
