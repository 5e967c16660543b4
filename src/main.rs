pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::{
    admin, applications, auth, candidates, companies, dashboard, email, jobs, payments, settings,
    subscriptions, users,
};

use crate::admin::adapter::outgoing::{
    AdminDirectoryPostgres, AdminLogRepositoryPostgres, AdminRoleRepositoryPostgres,
};
use crate::admin::application::ports::incoming::{
    AdminLogUseCase, AdminRoleUseCase, AuditLogger, PermissionChecker,
};
use crate::admin::application::services::{
    audit_channel, AdminLogService, AdminRoleService, BootstrapOutcome, PermissionService,
};
use crate::applications::adapter::outgoing::ApplicationRepositoryPostgres;
use crate::applications::application::{
    ports::incoming::ApplicationUseCase, services::ApplicationService,
};
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::{
    AccountRepositoryPostgres, Argon2Hasher, RedisTokenBlacklist,
};
use crate::auth::application::ports::incoming::{
    CurrentUserUseCase, SignInUseCase, SignOutUseCase, SignUpUseCase,
};
use crate::auth::application::ports::outgoing::{
    AccountStatusLookup, TokenBlacklist, TokenProvider,
};
use crate::auth::application::services::{
    CurrentUserService, SignInService, SignOutService, SignUpService,
};
use crate::candidates::adapter::outgoing::CandidateRepositoryPostgres;
use crate::candidates::application::{
    ports::incoming::CandidateUseCase, services::CandidateService,
};
use crate::companies::adapter::outgoing::CompanyRepositoryPostgres;
use crate::companies::application::{ports::incoming::CompanyUseCase, services::CompanyService};
use crate::dashboard::application::{
    ports::incoming::DashboardUseCase, services::DashboardService,
};
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::ports::outgoing::AccountNotifier;
use crate::email::application::services::AccountEmailService;
use crate::jobs::adapter::outgoing::JobRepositoryPostgres;
use crate::jobs::application::{ports::incoming::JobUseCase, services::JobService};
use crate::payments::adapter::outgoing::PaymentRepositoryPostgres;
use crate::payments::application::{ports::incoming::PaymentUseCase, services::PaymentService};
use crate::settings::adapter::outgoing::SettingsRepositoryPostgres;
use crate::settings::application::{
    ports::incoming::SettingsUseCase, services::SettingsService,
};
use crate::shared::api::custom_json_config;
use crate::shared::config::{AppConfig, SmtpConfig};
use crate::subscriptions::adapter::outgoing::SubscriptionRepositoryPostgres;
use crate::subscriptions::application::{
    ports::incoming::SubscriptionUseCase, services::SubscriptionService,
};
use crate::users::adapter::outgoing::UserRepositoryPostgres;
use crate::users::application::{ports::incoming::UserUseCase, services::UserService};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub sign_up_use_case: Arc<dyn SignUpUseCase + Send + Sync>,
    pub sign_in_use_case: Arc<dyn SignInUseCase + Send + Sync>,
    pub sign_out_use_case: Arc<dyn SignOutUseCase + Send + Sync>,
    pub current_user_use_case: Arc<dyn CurrentUserUseCase + Send + Sync>,
    pub permission_checker: Arc<dyn PermissionChecker + Send + Sync>,
    pub audit_logger: Arc<dyn AuditLogger + Send + Sync>,
    pub admin_role_use_case: Arc<dyn AdminRoleUseCase + Send + Sync>,
    pub admin_log_use_case: Arc<dyn AdminLogUseCase + Send + Sync>,
    pub user_use_case: Arc<dyn UserUseCase + Send + Sync>,
    pub company_use_case: Arc<dyn CompanyUseCase + Send + Sync>,
    pub candidate_use_case: Arc<dyn CandidateUseCase + Send + Sync>,
    pub job_use_case: Arc<dyn JobUseCase + Send + Sync>,
    pub application_use_case: Arc<dyn ApplicationUseCase + Send + Sync>,
    pub payment_use_case: Arc<dyn PaymentUseCase + Send + Sync>,
    pub subscription_use_case: Arc<dyn SubscriptionUseCase + Send + Sync>,
    pub settings_use_case: Arc<dyn SettingsUseCase + Send + Sync>,
    pub dashboard_use_case: Arc<dyn DashboardUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    let config = AppConfig::load().context("invalid configuration")?;

    let smtp_sender = match &config.smtp {
        SmtpConfig::Local { host, port } => {
            SmtpEmailSender::new_local(host, *port, &config.email_from)
        }
        SmtpConfig::Relay {
            server,
            username,
            password,
        } => SmtpEmailSender::new(server, username, password, &config.email_from)
            .map_err(anyhow::Error::msg)?,
    };

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("failed to connect to database")?;
    Migrator::up(&conn, None)
        .await
        .context("failed to run migrations")?;
    let db = Arc::new(conn);

    // Redis connection
    let redis = redis::Client::open(config.redis_url.as_str())
        .context("invalid REDIS_URL")?
        .get_connection_manager()
        .await
        .context("failed to connect to redis")?;

    let jwt_service = JwtTokenService::new(JwtConfig::from_env()?);
    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let token_blacklist: Arc<dyn TokenBlacklist + Send + Sync> =
        Arc::new(RedisTokenBlacklist::new(redis.clone()));
    let hasher = Arc::new(Argon2Hasher::from_env()?);
    let notifier: Arc<dyn AccountNotifier> =
        Arc::new(AccountEmailService::new(smtp_sender, config.app_base_url.clone()));

    // Repositories
    let account_repo = AccountRepositoryPostgres::new(Arc::clone(&db));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db));
    let company_repo = CompanyRepositoryPostgres::new(Arc::clone(&db));
    let candidate_repo = CandidateRepositoryPostgres::new(Arc::clone(&db));
    let job_repo = JobRepositoryPostgres::new(Arc::clone(&db));
    let application_repo = ApplicationRepositoryPostgres::new(Arc::clone(&db));
    let payment_repo = PaymentRepositoryPostgres::new(Arc::clone(&db));
    let subscription_repo = SubscriptionRepositoryPostgres::new(Arc::clone(&db));
    let admin_log_repo = AdminLogRepositoryPostgres::new(Arc::clone(&db));

    let account_status: Arc<dyn AccountStatusLookup + Send + Sync> =
        Arc::new(account_repo.clone());

    // Audit pipeline
    let (audit_logger, audit_worker) =
        audit_channel(&config.audit, Arc::new(admin_log_repo.clone()));
    let audit_handle = tokio::spawn(audit_worker.run());

    let admin_role_service = Arc::new(AdminRoleService::new(
        AdminRoleRepositoryPostgres::new(Arc::clone(&db)),
        Arc::new(account_repo.clone()),
        Arc::clone(&notifier),
    ));
    if let Some(email) = &config.bootstrap_admin_email {
        match admin_role_service.bootstrap(email).await {
            Ok(BootstrapOutcome::Appointed(id)) => info!(admin_id = %id, "Bootstrap admin ready"),
            Ok(BootstrapOutcome::AlreadyAdministrator) => {}
            Ok(BootstrapOutcome::ProfileNotFound) => {
                warn!(email = %email, "Bootstrap admin has no profile yet, sign up first")
            }
            Err(e) => warn!("Bootstrap admin failed: {}", e),
        }
    }

    let state = AppState {
        sign_up_use_case: Arc::new(SignUpService::new(
            account_repo.clone(),
            hasher.clone(),
            Arc::clone(&notifier),
        )),
        sign_in_use_case: Arc::new(SignInService::new(
            account_repo.clone(),
            hasher,
            token_provider.clone(),
        )),
        sign_out_use_case: Arc::new(SignOutService::new(
            token_provider.clone(),
            token_blacklist.clone(),
        )),
        current_user_use_case: Arc::new(CurrentUserService::new(account_repo)),
        permission_checker: Arc::new(PermissionService::new(AdminDirectoryPostgres::new(
            Arc::clone(&db),
        ))),
        audit_logger: Arc::new(audit_logger),
        admin_role_use_case: admin_role_service,
        admin_log_use_case: Arc::new(AdminLogService::new(admin_log_repo)),
        user_use_case: Arc::new(UserService::new(user_repo.clone(), Arc::clone(&notifier))),
        company_use_case: Arc::new(CompanyService::new(company_repo.clone())),
        candidate_use_case: Arc::new(CandidateService::new(candidate_repo.clone())),
        job_use_case: Arc::new(JobService::new(job_repo.clone())),
        application_use_case: Arc::new(ApplicationService::new(
            application_repo.clone(),
            Arc::new(job_repo.clone()),
            Arc::new(candidate_repo),
            Arc::new(company_repo.clone()),
        )),
        payment_use_case: Arc::new(PaymentService::new(payment_repo.clone())),
        subscription_use_case: Arc::new(SubscriptionService::new(subscription_repo.clone())),
        settings_use_case: Arc::new(SettingsService::new(SettingsRepositoryPostgres::new(
            Arc::clone(&db),
        ))),
        dashboard_use_case: Arc::new(DashboardService::new(
            Arc::new(user_repo),
            Arc::new(company_repo),
            Arc::new(job_repo),
            Arc::new(application_repo),
            Arc::new(payment_repo),
            Arc::new(subscription_repo),
        )),
    };

    let server_url = config.server_url();
    info!("Server run on: {}", server_url);
    let openapi = api::openapi::ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&token_blacklist)))
            .app_data(web::Data::new(Arc::clone(&account_status)))
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(web::Data::new(redis.clone()))
            .app_data(custom_json_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    // Every logger handle died with the server; let the worker flush what is queued.
    match tokio::time::timeout(Duration::from_secs(5), audit_handle).await {
        Ok(_) => info!("Audit log flushed"),
        Err(_) => warn!("Audit worker did not finish in time, pending entries lost"),
    }

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::sign_up_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::sign_in_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::sign_out_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::current_user_handler);
    // Admin back-office
    cfg.service(crate::admin::adapter::incoming::web::routes::my_permissions_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::list_roles_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::create_role_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::update_role_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::list_administrators_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::appoint_administrator_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::deactivate_administrator_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::list_admin_logs_handler);
    cfg.service(crate::dashboard::adapter::incoming::web::routes::dashboard_handler);
    // Users
    cfg.service(crate::users::adapter::incoming::web::routes::list_users_handler);
    cfg.service(crate::users::adapter::incoming::web::routes::get_user_handler);
    cfg.service(crate::users::adapter::incoming::web::routes::update_user_handler);
    cfg.service(crate::users::adapter::incoming::web::routes::activate_user_handler);
    cfg.service(crate::users::adapter::incoming::web::routes::deactivate_user_handler);
    cfg.service(crate::users::adapter::incoming::web::routes::set_email_verified_handler);
    // Companies
    cfg.service(crate::companies::adapter::incoming::web::routes::list_companies_handler);
    cfg.service(crate::companies::adapter::incoming::web::routes::create_company_handler);
    cfg.service(crate::companies::adapter::incoming::web::routes::update_company_handler);
    cfg.service(crate::companies::adapter::incoming::web::routes::verify_company_handler);
    cfg.service(crate::companies::adapter::incoming::web::routes::unverify_company_handler);
    cfg.service(crate::companies::adapter::incoming::web::routes::set_company_premium_handler);
    cfg.service(crate::companies::adapter::incoming::web::routes::get_own_company_handler);
    cfg.service(crate::companies::adapter::incoming::web::routes::update_own_company_handler);
    // Candidates
    cfg.service(crate::candidates::adapter::incoming::web::routes::get_own_candidate_handler);
    cfg.service(crate::candidates::adapter::incoming::web::routes::update_own_candidate_handler);
    cfg.service(crate::candidates::adapter::incoming::web::routes::list_candidates_handler);
    // Jobs
    cfg.service(crate::jobs::adapter::incoming::web::routes::list_public_jobs_handler);
    cfg.service(crate::jobs::adapter::incoming::web::routes::get_public_job_handler);
    cfg.service(crate::jobs::adapter::incoming::web::routes::list_own_jobs_handler);
    cfg.service(crate::jobs::adapter::incoming::web::routes::create_own_job_handler);
    cfg.service(crate::jobs::adapter::incoming::web::routes::update_own_job_handler);
    cfg.service(crate::jobs::adapter::incoming::web::routes::list_jobs_handler);
    cfg.service(crate::jobs::adapter::incoming::web::routes::create_job_handler);
    cfg.service(crate::jobs::adapter::incoming::web::routes::update_job_handler);
    cfg.service(crate::jobs::adapter::incoming::web::routes::activate_job_handler);
    cfg.service(crate::jobs::adapter::incoming::web::routes::deactivate_job_handler);
    // Applications
    cfg.service(crate::applications::adapter::incoming::web::routes::apply_handler);
    cfg.service(crate::applications::adapter::incoming::web::routes::list_own_applications_handler);
    cfg.service(crate::applications::adapter::incoming::web::routes::withdraw_application_handler);
    cfg.service(crate::applications::adapter::incoming::web::routes::list_job_applications_handler);
    cfg.service(
        crate::applications::adapter::incoming::web::routes::change_application_status_handler,
    );
    // Payments
    cfg.service(crate::payments::adapter::incoming::web::routes::list_payments_handler);
    cfg.service(crate::payments::adapter::incoming::web::routes::get_payment_handler);
    cfg.service(crate::payments::adapter::incoming::web::routes::create_payment_handler);
    cfg.service(crate::payments::adapter::incoming::web::routes::update_payment_handler);
    cfg.service(crate::payments::adapter::incoming::web::routes::change_payment_status_handler);
    cfg.service(crate::payments::adapter::incoming::web::routes::refund_payment_handler);
    // Subscriptions
    cfg.service(crate::subscriptions::adapter::incoming::web::routes::list_plans_handler);
    cfg.service(crate::subscriptions::adapter::incoming::web::routes::check_service_access_handler);
    cfg.service(crate::subscriptions::adapter::incoming::web::routes::list_subscriptions_handler);
    cfg.service(crate::subscriptions::adapter::incoming::web::routes::create_subscription_handler);
    cfg.service(
        crate::subscriptions::adapter::incoming::web::routes::change_subscription_status_handler,
    );
    // Settings
    cfg.service(crate::settings::adapter::incoming::web::routes::public_settings_handler);
    cfg.service(crate::settings::adapter::incoming::web::routes::list_settings_handler);
    cfg.service(crate::settings::adapter::incoming::web::routes::upsert_setting_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
