pub mod admin_logs;
pub mod admin_roles;
pub mod audit_logger;
pub mod permission_checker;

pub use admin_logs::{AdminLogError, AdminLogUseCase};
pub use admin_roles::{
    AdminRoleError, AdminRoleUseCase, AppointAdministratorCommand, CreateRoleCommand,
    RoleCommandError, UpdateRoleCommand,
};
pub use audit_logger::AuditLogger;
pub use permission_checker::PermissionChecker;

#[cfg(test)]
pub use admin_logs::MockAdminLogUseCase;
#[cfg(test)]
pub use admin_roles::MockAdminRoleUseCase;
#[cfg(test)]
pub use permission_checker::MockPermissionChecker;
