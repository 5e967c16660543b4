pub mod admin_directory;
pub mod admin_log_repository;
pub mod admin_role_repository;

pub use admin_directory::{AdminDirectory, AdminDirectoryError};
pub use admin_log_repository::{AdminLogFilter, AdminLogRepository, AdminLogRepositoryError};
pub use admin_role_repository::{
    AdminRoleRepository, AdminRoleRepositoryError, NewAdminRole, RoleChanges,
};

#[cfg(test)]
pub use admin_role_repository::MockAdminRoleRepository;
