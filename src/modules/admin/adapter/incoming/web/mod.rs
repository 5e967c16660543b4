pub mod guard;
pub mod routes;

pub use guard::require_permission;
