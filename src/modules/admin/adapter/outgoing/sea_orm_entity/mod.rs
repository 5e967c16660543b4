pub mod admin_logs;
pub mod admin_roles;
pub mod administrators;
