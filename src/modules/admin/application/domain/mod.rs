pub mod audit;
pub mod permission;
pub mod role;

pub use audit::{AdminLog, AuditEntry};
pub use permission::{Permission, PermissionDecision, PermissionSet, PermissionSetError};
pub use role::{AdminRole, Administrator};
