use actix_web::{get, patch, post, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::{AuditEntry, Permission};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::UserType;
use crate::companies::adapter::incoming::web::routes::map_company_error;
use crate::jobs::application::domain::JobType;
use crate::jobs::application::ports::incoming::{
    CreateJobCommand, JobCommandError, JobDraft, JobError, UpdateJobCommand,
};
use crate::shared::api::ApiResponse;
use crate::shared::listing::ListQuery;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize)]
pub struct JobRequest {
    /// Target company; only read on back-office creation
    pub employer_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub deadline: Option<DateTime<Utc>>,
}

impl JobRequest {
    fn into_draft(self) -> JobDraft {
        JobDraft {
            employer_id: self.employer_id,
            title: self.title,
            description: self.description,
            requirements: self.requirements,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            location: self.location,
            job_type: self.job_type,
            deadline: self.deadline,
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Public routes
// ──────────────────────────────────────────────────────────
//

#[get("/api/jobs")]
pub async fn list_public_jobs_handler(
    data: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match data.job_use_case.list_public(query.into_inner()).await {
        Ok(jobs) => ApiResponse::success(jobs),
        Err(e) => map_job_error(e),
    }
}

#[get("/api/jobs/{id}")]
pub async fn get_public_job_handler(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match data.job_use_case.get(path.into_inner()).await {
        Ok(job) if job.is_open(Utc::now()) => ApiResponse::success(job),
        Ok(_) => map_job_error(JobError::NotFound),
        Err(e) => map_job_error(e),
    }
}

//
// ──────────────────────────────────────────────────────────
// Company account routes
// ──────────────────────────────────────────────────────────
//

#[get("/api/company/jobs")]
pub async fn list_own_jobs_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(resp) = user.require_type(&[UserType::Company]) {
        return resp;
    }

    let company = match data.company_use_case.get_own(user.user_id).await {
        Ok(c) => c,
        Err(e) => return map_company_error(e),
    };

    match data.job_use_case.list_for_employer(company.id).await {
        Ok(jobs) => ApiResponse::success(jobs),
        Err(e) => map_job_error(e),
    }
}

#[post("/api/company/jobs")]
pub async fn create_own_job_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<JobRequest>,
) -> impl Responder {
    if let Err(resp) = user.require_type(&[UserType::Company]) {
        return resp;
    }

    let company = match data.company_use_case.get_own(user.user_id).await {
        Ok(c) => c,
        Err(e) => return map_company_error(e),
    };

    let mut draft = payload.into_inner().into_draft();
    draft.employer_id = Some(company.id);
    let command = match CreateJobCommand::new(draft) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    let policy = match data.settings_use_case.policy().await {
        Ok(policy) => policy,
        Err(e) => {
            tracing::error!("Reading site policy failed: {}", e);
            return ApiResponse::internal_error();
        }
    };
    if let Some(max) = policy.max_jobs_per_company {
        let open_jobs = match data.job_use_case.list_for_employer(company.id).await {
            Ok(jobs) => jobs.iter().filter(|j| j.is_active).count(),
            Err(e) => return map_job_error(e),
        };
        if !policy.allows_another_job(open_jobs) {
            return map_job_error(JobError::QuotaReached(max));
        }
    }

    match data.job_use_case.create(command).await {
        Ok(job) => ApiResponse::created(job),
        Err(e) => map_job_error(e),
    }
}

#[patch("/api/company/jobs/{id}")]
pub async fn update_own_job_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<JobRequest>,
) -> impl Responder {
    if let Err(resp) = user.require_type(&[UserType::Company]) {
        return resp;
    }

    let id = path.into_inner();
    let command = match UpdateJobCommand::new(payload.into_inner().into_draft()) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    let company = match data.company_use_case.get_own(user.user_id).await {
        Ok(c) => c,
        Err(e) => return map_company_error(e),
    };
    match data.job_use_case.get(id).await {
        Ok(job) if job.employer_id == company.id => {}
        Ok(_) => return map_job_error(JobError::NotOwner),
        Err(e) => return map_job_error(e),
    }

    match data.job_use_case.update(id, command).await {
        Ok(job) => ApiResponse::success(job),
        Err(e) => map_job_error(e),
    }
}

//
// ──────────────────────────────────────────────────────────
// Back-office routes
// ──────────────────────────────────────────────────────────
//

#[get("/api/admin/jobs")]
pub async fn list_jobs_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageJobs).await
    {
        return resp;
    }

    match data.job_use_case.list(query.into_inner()).await {
        Ok(jobs) => ApiResponse::success(jobs),
        Err(e) => map_job_error(e),
    }
}

#[post("/api/admin/jobs")]
pub async fn create_job_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<JobRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageJobs).await
    {
        return resp;
    }

    let command = match CreateJobCommand::new(payload.into_inner().into_draft()) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.job_use_case.create(command).await {
        Ok(job) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "create_job", "job", Some(job.id)).with_details(
                    json!({ "title": job.title, "employer_id": job.employer_id }),
                ),
            );
            ApiResponse::created(job)
        }
        Err(e) => map_job_error(e),
    }
}

#[patch("/api/admin/jobs/{id}")]
pub async fn update_job_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<JobRequest>,
) -> impl Responder {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageJobs).await
    {
        return resp;
    }

    let id = path.into_inner();
    let command = match UpdateJobCommand::new(payload.into_inner().into_draft()) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.job_use_case.update(id, command).await {
        Ok(job) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "update_job", "job", Some(id))
                    .with_details(json!({ "title": job.title })),
            );
            ApiResponse::success(job)
        }
        Err(e) => map_job_error(e),
    }
}

#[post("/api/admin/jobs/{id}/activate")]
pub async fn activate_job_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    set_active(user, data, path.into_inner(), true).await
}

#[post("/api/admin/jobs/{id}/deactivate")]
pub async fn deactivate_job_handler(
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
    active: bool,
) -> HttpResponse {
    if let Err(resp) =
        require_permission(data.permission_checker.as_ref(), &user, Permission::ManageJobs).await
    {
        return resp;
    }

    match data.job_use_case.set_active(id, active).await {
        Ok(job) => {
            let action = if active { "activate_job" } else { "deactivate_job" };
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, action, "job", Some(id))
                    .with_details(json!({ "title": job.title })),
            );
            ApiResponse::success(job)
        }
        Err(e) => map_job_error(e),
    }
}

//
// ──────────────────────────────────────────────────────────
// Error Mapping
// ──────────────────────────────────────────────────────────
//

fn map_command_error(err: JobCommandError) -> HttpResponse {
    let code = match err {
        JobCommandError::MissingField(_) => "MISSING_FIELD",
        JobCommandError::NegativeSalary | JobCommandError::InvalidSalaryRange => {
            "INVALID_SALARY_RANGE"
        }
        JobCommandError::NoChanges => "VALIDATION_ERROR",
    };
    ApiResponse::bad_request(code, &err.to_string())
}

pub fn map_job_error(err: JobError) -> HttpResponse {
    match err {
        JobError::NotFound => ApiResponse::not_found("JOB_NOT_FOUND", "Job not found"),
        JobError::EmployerNotFound => {
            ApiResponse::not_found("COMPANY_NOT_FOUND", "Employer company not found")
        }
        JobError::NotOwner => {
            ApiResponse::forbidden("NOT_OWNER", "Job does not belong to your company")
        }
        JobError::QuotaReached(_) => {
            ApiResponse::unprocessable("JOB_QUOTA_REACHED", &err.to_string())
        }
        JobError::Invalid(e) => map_command_error(e),
        JobError::Internal(msg) => {
            tracing::error!("Job operation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::application::ports::incoming::MockCompanyUseCase;
    use crate::jobs::application::domain::Job;
    use crate::jobs::application::ports::incoming::MockJobUseCase;
    use crate::settings::application::domain::SitePolicy;
    use crate::settings::application::ports::incoming::MockSettingsUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, stub_token_provider};
    use crate::tests::support::fixtures::{sample_company, sample_job};
    use crate::tests::support::stubs::{GrantOnly, RecordingAuditLogger};
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn missing_title_never_creates_a_job() {
        let mut jobs = MockJobUseCase::new();
        jobs.expect_create().never();
        let state = TestAppStateBuilder::default()
            .with_permissions(GrantOnly(vec![Permission::ManageJobs]))
            .with_jobs(jobs)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(Uuid::new_v4(), UserType::Admin)))
                .service(create_job_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/admin/jobs")
            .insert_header(bearer())
            .set_json(json!({ "employer_id": Uuid::new_v4(), "location": "Paris" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["error"]["code"], "MISSING_FIELD");
    }

    #[actix_web::test]
    async fn admin_deactivation_is_audited() {
        let mut jobs = MockJobUseCase::new();
        jobs.expect_set_active()
            .with(mockall::predicate::always(), mockall::predicate::eq(false))
            .returning(|id, active| {
                let mut job = sample_job(Uuid::new_v4());
                job.id = id;
                job.is_active = active;
                Ok(job)
            });
        let audit = Arc::new(RecordingAuditLogger::default());
        let admin_id = Uuid::new_v4();
        let state = TestAppStateBuilder::default()
            .with_permissions(GrantOnly(vec![Permission::ManageJobs]))
            .with_jobs(jobs)
            .with_audit_logger(audit.clone())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(admin_id, UserType::Admin)))
                .service(deactivate_job_handler),
        )
        .await;

        let id = Uuid::new_v4();
        let req = test::TestRequest::post()
            .uri(&format!("/api/admin/jobs/{}/deactivate", id))
            .insert_header(bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["is_active"], false);
        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].admin_id, admin_id);
        assert_eq!(entries[0].action_type, "deactivate_job");
        assert_eq!(entries[0].target_id, Some(id));
    }

    fn job_quota(max: Option<u32>) -> MockSettingsUseCase {
        let mut settings = MockSettingsUseCase::new();
        settings.expect_policy().returning(move || {
            Ok(SitePolicy {
                max_jobs_per_company: max,
                ..Default::default()
            })
        });
        settings
    }

    #[actix_web::test]
    async fn company_creates_job_for_its_own_company() {
        let owner = Uuid::new_v4();
        let company = sample_company(Some(owner));
        let company_id = company.id;
        let mut companies = MockCompanyUseCase::new();
        companies
            .expect_get_own()
            .returning(move |_| Ok(company.clone()));
        let mut jobs = MockJobUseCase::new();
        jobs.expect_create()
            .withf(move |cmd| cmd.employer_id == company_id && cmd.title == "Rust developer")
            .times(1)
            .returning(|cmd| {
                let mut job: Job = sample_job(cmd.employer_id);
                job.title = cmd.title;
                Ok(job)
            });
        let state = TestAppStateBuilder::default()
            .with_companies(companies)
            .with_jobs(jobs)
            .with_settings(job_quota(None))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(owner, UserType::Company)))
                .service(create_own_job_handler),
        )
        .await;

        // employer_id in the body is ignored for company accounts
        let req = test::TestRequest::post()
            .uri("/api/company/jobs")
            .insert_header(bearer())
            .set_json(json!({
                "employer_id": Uuid::new_v4(),
                "title": "Rust developer",
                "location": "Remote",
                "job_type": "freelance"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn company_at_job_quota_cannot_post_more() {
        let owner = Uuid::new_v4();
        let company = sample_company(Some(owner));
        let mut companies = MockCompanyUseCase::new();
        companies
            .expect_get_own()
            .returning(move |_| Ok(company.clone()));
        let mut jobs = MockJobUseCase::new();
        jobs.expect_list_for_employer().returning(|employer_id| {
            let mut closed = sample_job(employer_id);
            closed.is_active = false;
            Ok(vec![sample_job(employer_id), sample_job(employer_id), closed])
        });
        jobs.expect_create().never();
        let state = TestAppStateBuilder::default()
            .with_companies(companies)
            .with_jobs(jobs)
            .with_settings(job_quota(Some(2)))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(owner, UserType::Company)))
                .service(create_own_job_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/company/jobs")
            .insert_header(bearer())
            .set_json(json!({
                "title": "Rust developer",
                "location": "Remote",
                "job_type": "freelance"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "JOB_QUOTA_REACHED");
    }

    #[actix_web::test]
    async fn company_cannot_edit_another_companys_job() {
        let owner = Uuid::new_v4();
        let mut companies = MockCompanyUseCase::new();
        companies
            .expect_get_own()
            .returning(|owner| Ok(sample_company(Some(owner))));
        let mut jobs = MockJobUseCase::new();
        jobs.expect_get()
            .returning(|_| Ok(sample_job(Uuid::new_v4())));
        jobs.expect_update().never();
        let state = TestAppStateBuilder::default()
            .with_companies(companies)
            .with_jobs(jobs)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(stub_token_provider(owner, UserType::Company)))
                .service(update_own_job_handler),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/company/jobs/{}", Uuid::new_v4()))
            .insert_header(bearer())
            .set_json(json!({ "title": "Hijacked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["error"]["code"], "NOT_OWNER");
    }

    #[actix_web::test]
    async fn closed_job_is_hidden_from_public_detail() {
        let mut jobs = MockJobUseCase::new();
        jobs.expect_get().returning(|_| {
            let mut job = sample_job(Uuid::new_v4());
            job.is_active = false;
            Ok(job)
        });
        let state = TestAppStateBuilder::default().with_jobs(jobs).build();
        let app =
            test::init_service(App::new().app_data(state).service(get_public_job_handler)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/jobs/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
