mod administrators;
mod logs;
mod permissions;
mod roles;

pub use administrators::{
    appoint_administrator_handler, deactivate_administrator_handler, list_administrators_handler,
    AppointAdministratorRequest,
};
pub use logs::list_admin_logs_handler;
pub use permissions::my_permissions_handler;
pub use roles::{create_role_handler, list_roles_handler, update_role_handler, RoleRequest};
