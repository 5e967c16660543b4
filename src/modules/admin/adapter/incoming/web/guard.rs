use actix_web::HttpResponse;
use tracing::info;

use crate::admin::application::{domain::Permission, ports::incoming::PermissionChecker};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;

/// First step of every back-office handler: 403 unless `user` holds `permission`.
pub async fn require_permission(
    checker: &dyn PermissionChecker,
    user: &AuthenticatedUser,
    permission: Permission,
) -> Result<(), HttpResponse> {
    if checker.has_permission(user.user_id, permission).await {
        Ok(())
    } else {
        info!(user_id = %user.user_id, permission = %permission, "Admin action refused");
        Err(ApiResponse::forbidden(
            "PERMISSION_DENIED",
            "You do not have permission to perform this action",
        ))
    }
}
