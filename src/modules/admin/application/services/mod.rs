pub mod admin_log_service;
pub mod admin_role_service;
pub mod audit_logger;
pub mod permission_service;

pub use admin_log_service::AdminLogService;
pub use admin_role_service::{AdminRoleService, BootstrapOutcome};
pub use audit_logger::{audit_channel, AdminActionLogger, AuditFlushWorker};
pub use permission_service::PermissionService;
