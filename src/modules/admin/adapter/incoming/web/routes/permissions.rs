use actix_web::{get, web, Responder};
use std::collections::BTreeMap;

use crate::admin::application::domain::Permission;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Every permission key with the caller's grant, for the back-office shell.
#[get("/api/admin/permissions")]
pub async fn my_permissions_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    let checks = data
        .permission_checker
        .check_many(user.user_id, &Permission::ALL)
        .await;

    let body: BTreeMap<&'static str, bool> =
        checks.into_iter().map(|(p, ok)| (p.as_str(), ok)).collect();
    ApiResponse::success(body)
}
