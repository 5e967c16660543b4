use actix_web::{get, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::{AuditEntry, Permission};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::settings::application::domain::SettingError;
use crate::settings::application::ports::incoming::{SettingsError, UpsertSettingCommand};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SettingRequest {
    pub value: Value,
    pub is_public: Option<bool>,
}

#[get("/api/settings/public")]
pub async fn public_settings_handler(data: web::Data<AppState>) -> impl Responder {
    match data.settings_use_case.list_public().await {
        Ok(settings) => ApiResponse::success(settings),
        Err(e) => map_settings_error(e),
    }
}

#[get("/api/admin/settings")]
pub async fn list_settings_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageSettings)
            .await
    {
        return resp;
    }

    match data.settings_use_case.list_all().await {
        Ok(settings) => ApiResponse::success(settings),
        Err(e) => map_settings_error(e),
    }
}

#[put("/api/admin/settings/{key}")]
pub async fn upsert_setting_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<SettingRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageSettings)
            .await
    {
        return resp;
    }

    let key = path.into_inner();
    let dto = payload.into_inner();
    let command = match UpsertSettingCommand::new(&key, dto.value, dto.is_public) {
        Ok(cmd) => cmd,
        Err(e) => return map_settings_error(SettingsError::Invalid(e)),
    };

    match data.settings_use_case.upsert(command).await {
        Ok(setting) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "update_setting", "site_setting", None)
                    .with_details(json!({
                        "key": setting.value.key(),
                        "value": setting.value.to_json(),
                        "is_public": setting.is_public,
                    })),
            );
            ApiResponse::success(setting)
        }
        Err(e) => map_settings_error(e),
    }
}

fn map_settings_error(err: SettingsError) -> HttpResponse {
    match err {
        SettingsError::Invalid(SettingError::UnknownKey(key)) => {
            ApiResponse::not_found("UNKNOWN_SETTING", &format!("Unknown setting '{}'", key))
        }
        SettingsError::Invalid(e @ SettingError::InvalidValue { .. }) => {
            ApiResponse::bad_request("INVALID_SETTING_VALUE", &e.to_string())
        }
        SettingsError::Internal(msg) => {
            tracing::error!("Settings operation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
