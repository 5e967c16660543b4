use actix_web::{get, put, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::Permission;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::UserType;
use crate::candidates::application::ports::incoming::{
    CandidateError, UpdateCandidateCommand, UpdateCandidateCommandError,
};
use crate::shared::api::ApiResponse;
use crate::shared::listing::ListQuery;
use crate::AppState;

const CANDIDATE_TYPES: &[UserType] = &[UserType::Candidate, UserType::Student];

#[derive(Debug, Deserialize)]
pub struct CandidateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub cv_url: Option<String>,
}

#[get("/api/candidate/profile")]
pub async fn get_own_candidate_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(resp) = user.require_type(CANDIDATE_TYPES) {
        return resp;
    }

    match data.candidate_use_case.get_own(user.user_id).await {
        Ok(candidate) => ApiResponse::success(candidate),
        Err(e) => map_candidate_error(e),
    }
}

#[put("/api/candidate/profile")]
pub async fn update_own_candidate_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<CandidateProfileRequest>,
) -> impl Responder {
    if let Err(resp) = user.require_type(CANDIDATE_TYPES) {
        return resp;
    }

    let dto = payload.into_inner();
    let command =
        match UpdateCandidateCommand::new(dto.name, dto.phone, dto.description, dto.cv_url) {
            Ok(cmd) => cmd,
            Err(e) => return map_command_error(e),
        };

    match data.candidate_use_case.update_own(user.user_id, command).await {
        Ok(candidate) => ApiResponse::success(candidate),
        Err(e) => map_candidate_error(e),
    }
}

#[get("/api/admin/candidates")]
pub async fn list_candidates_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageUsers).await
    {
        return resp;
    }

    match data.candidate_use_case.list(query.into_inner()).await {
        Ok(candidates) => ApiResponse::success(candidates),
        Err(e) => map_candidate_error(e),
    }
}

fn map_command_error(err: UpdateCandidateCommandError) -> HttpResponse {
    let code = match err {
        UpdateCandidateCommandError::InvalidCvUrl => "INVALID_CV_URL",
        UpdateCandidateCommandError::EmptyName | UpdateCandidateCommandError::NoChanges => {
            "VALIDATION_ERROR"
        }
    };
    ApiResponse::bad_request(code, &err.to_string())
}

pub fn map_candidate_error(err: CandidateError) -> HttpResponse {
    match err {
        CandidateError::NotFound => {
            ApiResponse::not_found("CANDIDATE_NOT_FOUND", "Candidate profile not found")
        }
        CandidateError::Internal(msg) => {
            tracing::error!("Candidate operation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
