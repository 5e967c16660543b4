use actix_web::{get, patch, post, web, HttpResponse, Responder};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::application::domain::ApplicationStatus;
use crate::applications::application::ports::incoming::{ApplicationActor, ApplicationError};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::UserType;
use crate::shared::api::ApiResponse;
use crate::AppState;

const APPLICANT_TYPES: &[UserType] = &[UserType::Candidate, UserType::Student];

#[derive(Debug, Default, Deserialize)]
pub struct ApplyRequest {
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: ApplicationStatus,
}

//
// ──────────────────────────────────────────────────────────
// Candidate side
// ──────────────────────────────────────────────────────────
//

#[post("/api/jobs/{id}/applications")]
pub async fn apply_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: Option<web::Json<ApplyRequest>>,
) -> impl Responder {
    if let Err(resp) = user.require_type(APPLICANT_TYPES) {
        return resp;
    }

    let cover_letter = payload.and_then(|p| p.into_inner().cover_letter);
    match data
        .application_use_case
        .apply(path.into_inner(), user.user_id, cover_letter)
        .await
    {
        Ok(application) => ApiResponse::created(application),
        Err(e) => map_application_error(e),
    }
}

#[get("/api/me/applications")]
pub async fn list_own_applications_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(resp) = user.require_type(APPLICANT_TYPES) {
        return resp;
    }

    match data.application_use_case.list_own(user.user_id).await {
        Ok(applications) => ApiResponse::success(applications),
        Err(e) => map_application_error(e),
    }
}

#[patch("/api/me/applications/{id}/withdraw")]
pub async fn withdraw_application_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = user.require_type(APPLICANT_TYPES) {
        return resp;
    }

    match data
        .application_use_case
        .change_status(
            path.into_inner(),
            ApplicationStatus::Withdrawn,
            ApplicationActor::Candidate(user.user_id),
        )
        .await
    {
        Ok(application) => ApiResponse::success(application),
        Err(e) => map_application_error(e),
    }
}

//
// ──────────────────────────────────────────────────────────
// Employer side
// ──────────────────────────────────────────────────────────
//

#[get("/api/company/jobs/{id}/applications")]
pub async fn list_job_applications_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = user.require_type(&[UserType::Company]) {
        return resp;
    }

    match data
        .application_use_case
        .list_for_job(path.into_inner(), user.user_id)
        .await
    {
        Ok(applications) => ApiResponse::success(applications),
        Err(e) => map_application_error(e),
    }
}

#[patch("/api/company/applications/{id}/status")]
pub async fn change_application_status_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<StatusRequest>,
) -> impl Responder {
    if let Err(resp) = user.require_type(&[UserType::Company]) {
        return resp;
    }

    match data
        .application_use_case
        .change_status(
            path.into_inner(),
            payload.status,
            ApplicationActor::Employer(user.user_id),
        )
        .await
    {
        Ok(application) => ApiResponse::success(application),
        Err(e) => map_application_error(e),
    }
}

pub fn map_application_error(err: ApplicationError) -> HttpResponse {
    match err {
        ApplicationError::JobNotFound => ApiResponse::not_found("JOB_NOT_FOUND", "Job not found"),
        ApplicationError::JobClosed => ApiResponse::unprocessable("JOB_CLOSED", &err.to_string()),
        ApplicationError::CandidateProfileMissing => {
            ApiResponse::not_found("CANDIDATE_NOT_FOUND", &err.to_string())
        }
        ApplicationError::CompanyMissing => {
            ApiResponse::not_found("COMPANY_NOT_FOUND", &err.to_string())
        }
        ApplicationError::AlreadyApplied => {
            ApiResponse::conflict("ALREADY_APPLIED", &err.to_string())
        }
        ApplicationError::NotFound => {
            ApiResponse::not_found("APPLICATION_NOT_FOUND", "Application not found")
        }
        ApplicationError::Forbidden => ApiResponse::forbidden("FORBIDDEN", &err.to_string()),
        ApplicationError::InvalidTransition(e) => {
            ApiResponse::unprocessable("INVALID_TRANSITION", &e.to_string())
        }
        ApplicationError::StatusChanged => {
            ApiResponse::conflict("STATUS_CHANGED", &err.to_string())
        }
        ApplicationError::Internal(msg) => {
            tracing::error!("Application operation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
