use actix_web::{get, patch, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::{AuditEntry, Permission};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::UserType;
use crate::companies::application::ports::incoming::{
    CompanyCommandError, CompanyError, CreateCompanyCommand, UpdateCompanyCommand,
};
use crate::shared::api::ApiResponse;
use crate::shared::listing::ListQuery;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    /// Company account that will own the row (admin creation only)
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct PremiumRequest {
    pub is_premium: bool,
}

//
// ──────────────────────────────────────────────────────────
// Back-office routes
// ──────────────────────────────────────────────────────────
//

#[get("/api/admin/companies")]
pub async fn list_companies_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageCompanies)
            .await
    {
        return resp;
    }

    match data.company_use_case.list(query.into_inner()).await {
        Ok(companies) => ApiResponse::success(companies),
        Err(e) => map_company_error(e),
    }
}

#[post("/api/admin/companies")]
pub async fn create_company_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<CompanyRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageCompanies)
            .await
    {
        return resp;
    }

    let dto = payload.into_inner();
    let command =
        match CreateCompanyCommand::new(dto.name, dto.sector, dto.address, dto.tax_id, dto.user_id)
        {
            Ok(cmd) => cmd,
            Err(e) => return map_command_error(e),
        };

    match data.company_use_case.create(command).await {
        Ok(company) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "create_company", "company", Some(company.id))
                    .with_details(json!({ "name": company.name, "sector": company.sector })),
            );
            ApiResponse::created(company)
        }
        Err(e) => map_company_error(e),
    }
}

#[patch("/api/admin/companies/{id}")]
pub async fn update_company_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<CompanyRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageCompanies)
            .await
    {
        return resp;
    }

    let id = path.into_inner();
    let dto = payload.into_inner();
    let command = match UpdateCompanyCommand::new(dto.name, dto.sector, dto.address, dto.tax_id) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.company_use_case.update(id, command).await {
        Ok(company) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "update_company", "company", Some(id))
                    .with_details(json!({ "name": company.name })),
            );
            ApiResponse::success(company)
        }
        Err(e) => map_company_error(e),
    }
}

#[post("/api/admin/companies/{id}/verify")]
pub async fn verify_company_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    set_verified(user, data, path.into_inner(), true).await
}

#[post("/api/admin/companies/{id}/unverify")]
pub async fn unverify_company_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    set_verified(user, data, path.into_inner(), false).await
}

async fn set_verified(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    id: Uuid,
    verified: bool,
) -> HttpResponse {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageCompanies)
            .await
    {
        return resp;
    }

    match data.company_use_case.set_verified(id, verified).await {
        Ok(company) => {
            let action = if verified { "verify_company" } else { "unverify_company" };
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, action, "company", Some(id))
                    .with_details(json!({ "name": company.name })),
            );
            ApiResponse::success(company)
        }
        Err(e) => map_company_error(e),
    }
}

#[put("/api/admin/companies/{id}/premium")]
pub async fn set_company_premium_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<PremiumRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageCompanies)
            .await
    {
        return resp;
    }

    let id = path.into_inner();
    let premium = payload.is_premium;
    match data.company_use_case.set_premium(id, premium).await {
        Ok(company) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "set_company_premium", "company", Some(id))
                    .with_details(json!({ "is_premium": premium })),
            );
            ApiResponse::success(company)
        }
        Err(e) => map_company_error(e),
    }
}

//
// ──────────────────────────────────────────────────────────
// Company account routes
// ──────────────────────────────────────────────────────────
//

#[get("/api/company/profile")]
pub async fn get_own_company_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(resp) = user.require_type(&[UserType::Company]) {
        return resp;
    }

    match data.company_use_case.get_own(user.user_id).await {
        Ok(company) => ApiResponse::success(company),
        Err(e) => map_company_error(e),
    }
}

#[patch("/api/company/profile")]
pub async fn update_own_company_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<CompanyRequest>,
) -> impl Responder {
    if let Err(resp) = user.require_type(&[UserType::Company]) {
        return resp;
    }

    let dto = payload.into_inner();
    let command = match UpdateCompanyCommand::new(dto.name, dto.sector, dto.address, dto.tax_id) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    let company = match data.company_use_case.get_own(user.user_id).await {
        Ok(c) => c,
        Err(e) => return map_company_error(e),
    };

    match data.company_use_case.update(company.id, command).await {
        Ok(company) => ApiResponse::success(company),
        Err(e) => map_company_error(e),
    }
}

//
// ──────────────────────────────────────────────────────────
// Error Mapping
// ──────────────────────────────────────────────────────────
//

fn map_command_error(err: CompanyCommandError) -> HttpResponse {
    match err {
        CompanyCommandError::MissingField(_) => {
            ApiResponse::bad_request("MISSING_FIELD", &err.to_string())
        }
        CompanyCommandError::NoChanges => {
            ApiResponse::bad_request("VALIDATION_ERROR", &err.to_string())
        }
    }
}

pub fn map_company_error(err: CompanyError) -> HttpResponse {
    match err {
        CompanyError::NotFound => ApiResponse::not_found("COMPANY_NOT_FOUND", "Company not found"),
        CompanyError::OwnerTaken => {
            ApiResponse::conflict("OWNER_HAS_COMPANY", "This account already owns a company")
        }
        CompanyError::Internal(msg) => {
            tracing::error!("Company operation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
