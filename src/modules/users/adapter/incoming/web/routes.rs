use actix_web::{get, patch, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::{AuditEntry, Permission};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::UserType;
use crate::shared::api::ApiResponse;
use crate::shared::listing::{ListQuery, SortOrder};
use crate::users::application::ports::incoming::{UpdateUserCommand, UserError};
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
    pub user_type: Option<UserType>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailVerifiedRequest {
    pub verified: bool,
}

//
// ──────────────────────────────────────────────────────────
// Routes
// ──────────────────────────────────────────────────────────
//

#[get("/api/admin/users")]
pub async fn list_users_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    params: web::Query<UserListParams>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageUsers).await
    {
        return resp;
    }

    let params = params.into_inner();
    let query = ListQuery {
        search: params.search,
        status: params.status,
        sort: params.sort,
    };

    match data.user_use_case.list(query, params.user_type).await {
        Ok(users) => ApiResponse::success(users),
        Err(e) => map_user_error(e),
    }
}

#[get("/api/admin/users/{id}")]
pub async fn get_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageUsers).await
    {
        return resp;
    }

    match data.user_use_case.get(path.into_inner()).await {
        Ok(account) => ApiResponse::success(account),
        Err(e) => map_user_error(e),
    }
}

#[patch("/api/admin/users/{id}")]
pub async fn update_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateUserRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageUsers).await
    {
        return resp;
    }

    let id = path.into_inner();
    let command = match UpdateUserCommand::new(payload.into_inner().name) {
        Ok(cmd) => cmd,
        Err(e) => return ApiResponse::bad_request("MISSING_FIELD", &e.to_string()),
    };

    match data.user_use_case.update(id, command).await {
        Ok(account) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "update_user", "profile", Some(id))
                    .with_details(json!({ "name": account.name })),
            );
            ApiResponse::success(account)
        }
        Err(e) => map_user_error(e),
    }
}

#[post("/api/admin/users/{id}/activate")]
pub async fn activate_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    set_active(user, data, path.into_inner(), true).await
}

#[post("/api/admin/users/{id}/deactivate")]
pub async fn deactivate_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    set_active(user, data, path.into_inner(), false).await
}

async fn set_active(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    id: Uuid,
    is_active: bool,
) -> HttpResponse {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageUsers).await
    {
        return resp;
    }

    match data.user_use_case.set_active(id, is_active).await {
        Ok(account) => {
            let action = if is_active { "activate_user" } else { "deactivate_user" };
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, action, "profile", Some(id))
                    .with_details(json!({ "email": account.email })),
            );
            ApiResponse::success(account)
        }
        Err(e) => map_user_error(e),
    }
}

#[put("/api/admin/users/{id}/email-verified")]
pub async fn set_email_verified_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<EmailVerifiedRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageUsers).await
    {
        return resp;
    }

    let id = path.into_inner();
    let verified = payload.verified;
    match data.user_use_case.set_email_verified(id, verified).await {
        Ok(account) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "set_email_verified", "profile", Some(id))
                    .with_details(json!({ "verified": verified })),
            );
            ApiResponse::success(account)
        }
        Err(e) => map_user_error(e),
    }
}

//
// ──────────────────────────────────────────────────────────
// Error Mapping
// ──────────────────────────────────────────────────────────
//

fn map_user_error(err: UserError) -> HttpResponse {
    match err {
        UserError::NotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        UserError::Internal(msg) => {
            tracing::error!("User operation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
