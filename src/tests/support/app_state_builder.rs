use actix_web::web;
use std::sync::Arc;

use crate::admin::application::ports::incoming::{
    AdminLogUseCase, AdminRoleUseCase, AuditLogger, MockAdminLogUseCase, MockAdminRoleUseCase,
    PermissionChecker,
};
use crate::applications::application::ports::incoming::{
    ApplicationUseCase, MockApplicationUseCase,
};
use crate::auth::application::ports::incoming::{
    CurrentUserUseCase, MockCurrentUserUseCase, MockSignInUseCase, MockSignOutUseCase,
    MockSignUpUseCase, SignInUseCase, SignOutUseCase, SignUpUseCase,
};
use crate::candidates::application::ports::incoming::{CandidateUseCase, MockCandidateUseCase};
use crate::companies::application::ports::incoming::{CompanyUseCase, MockCompanyUseCase};
use crate::dashboard::application::ports::incoming::{DashboardUseCase, MockDashboardUseCase};
use crate::jobs::application::ports::incoming::{JobUseCase, MockJobUseCase};
use crate::payments::application::ports::incoming::{MockPaymentUseCase, PaymentUseCase};
use crate::settings::application::ports::incoming::{MockSettingsUseCase, SettingsUseCase};
use crate::subscriptions::application::ports::incoming::{
    MockSubscriptionUseCase, SubscriptionUseCase,
};
use crate::tests::support::stubs::{GrantOnly, RecordingAuditLogger};
use crate::users::application::ports::incoming::{MockUserUseCase, UserUseCase};
use crate::AppState;

/// `AppState` where every use case is an expectation-free mock.
///
/// Tests replace only what the handler under test touches; any other call
/// panics inside mockall.
pub struct TestAppStateBuilder {
    sign_up: Arc<dyn SignUpUseCase + Send + Sync>,
    sign_in: Arc<dyn SignInUseCase + Send + Sync>,
    sign_out: Arc<dyn SignOutUseCase + Send + Sync>,
    current_user: Arc<dyn CurrentUserUseCase + Send + Sync>,
    permissions: Arc<dyn PermissionChecker + Send + Sync>,
    audit_logger: Arc<dyn AuditLogger + Send + Sync>,
    admin_roles: Arc<dyn AdminRoleUseCase + Send + Sync>,
    admin_logs: Arc<dyn AdminLogUseCase + Send + Sync>,
    users: Arc<dyn UserUseCase + Send + Sync>,
    companies: Arc<dyn CompanyUseCase + Send + Sync>,
    candidates: Arc<dyn CandidateUseCase + Send + Sync>,
    jobs: Arc<dyn JobUseCase + Send + Sync>,
    applications: Arc<dyn ApplicationUseCase + Send + Sync>,
    payments: Arc<dyn PaymentUseCase + Send + Sync>,
    subscriptions: Arc<dyn SubscriptionUseCase + Send + Sync>,
    settings: Arc<dyn SettingsUseCase + Send + Sync>,
    dashboard: Arc<dyn DashboardUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            sign_up: Arc::new(MockSignUpUseCase::new()),
            sign_in: Arc::new(MockSignInUseCase::new()),
            sign_out: Arc::new(MockSignOutUseCase::new()),
            current_user: Arc::new(MockCurrentUserUseCase::new()),
            permissions: Arc::new(GrantOnly(vec![])),
            audit_logger: Arc::new(RecordingAuditLogger::default()),
            admin_roles: Arc::new(MockAdminRoleUseCase::new()),
            admin_logs: Arc::new(MockAdminLogUseCase::new()),
            users: Arc::new(MockUserUseCase::new()),
            companies: Arc::new(MockCompanyUseCase::new()),
            candidates: Arc::new(MockCandidateUseCase::new()),
            jobs: Arc::new(MockJobUseCase::new()),
            applications: Arc::new(MockApplicationUseCase::new()),
            payments: Arc::new(MockPaymentUseCase::new()),
            subscriptions: Arc::new(MockSubscriptionUseCase::new()),
            settings: Arc::new(MockSettingsUseCase::new()),
            dashboard: Arc::new(MockDashboardUseCase::new()),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_sign_up(mut self, uc: impl SignUpUseCase + 'static) -> Self {
        self.sign_up = Arc::new(uc);
        self
    }

    pub fn with_sign_in(mut self, uc: impl SignInUseCase + 'static) -> Self {
        self.sign_in = Arc::new(uc);
        self
    }

    pub fn with_sign_out(mut self, uc: impl SignOutUseCase + 'static) -> Self {
        self.sign_out = Arc::new(uc);
        self
    }

    pub fn with_current_user(mut self, uc: impl CurrentUserUseCase + 'static) -> Self {
        self.current_user = Arc::new(uc);
        self
    }

    pub fn with_permissions(mut self, checker: impl PermissionChecker + 'static) -> Self {
        self.permissions = Arc::new(checker);
        self
    }

    pub fn with_audit_logger(mut self, logger: Arc<dyn AuditLogger + Send + Sync>) -> Self {
        self.audit_logger = logger;
        self
    }

    pub fn with_admin_roles(mut self, uc: impl AdminRoleUseCase + 'static) -> Self {
        self.admin_roles = Arc::new(uc);
        self
    }

    pub fn with_admin_logs(mut self, uc: impl AdminLogUseCase + 'static) -> Self {
        self.admin_logs = Arc::new(uc);
        self
    }

    pub fn with_users(mut self, uc: impl UserUseCase + 'static) -> Self {
        self.users = Arc::new(uc);
        self
    }

    pub fn with_companies(mut self, uc: impl CompanyUseCase + 'static) -> Self {
        self.companies = Arc::new(uc);
        self
    }

    pub fn with_candidates(mut self, uc: impl CandidateUseCase + 'static) -> Self {
        self.candidates = Arc::new(uc);
        self
    }

    pub fn with_jobs(mut self, uc: impl JobUseCase + 'static) -> Self {
        self.jobs = Arc::new(uc);
        self
    }

    pub fn with_applications(mut self, uc: impl ApplicationUseCase + 'static) -> Self {
        self.applications = Arc::new(uc);
        self
    }

    pub fn with_payments(mut self, uc: impl PaymentUseCase + 'static) -> Self {
        self.payments = Arc::new(uc);
        self
    }

    pub fn with_subscriptions(mut self, uc: impl SubscriptionUseCase + 'static) -> Self {
        self.subscriptions = Arc::new(uc);
        self
    }

    pub fn with_settings(mut self, uc: impl SettingsUseCase + 'static) -> Self {
        self.settings = Arc::new(uc);
        self
    }

    pub fn with_dashboard(mut self, uc: impl DashboardUseCase + 'static) -> Self {
        self.dashboard = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            sign_up_use_case: self.sign_up,
            sign_in_use_case: self.sign_in,
            sign_out_use_case: self.sign_out,
            current_user_use_case: self.current_user,
            permission_checker: self.permissions,
            audit_logger: self.audit_logger,
            admin_role_use_case: self.admin_roles,
            admin_log_use_case: self.admin_logs,
            user_use_case: self.users,
            company_use_case: self.companies,
            candidate_use_case: self.candidates,
            job_use_case: self.jobs,
            application_use_case: self.applications,
            payment_use_case: self.payments,
            subscription_use_case: self.subscriptions,
            settings_use_case: self.settings,
            dashboard_use_case: self.dashboard,
        })
    }
}
