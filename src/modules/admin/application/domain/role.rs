use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::permission::PermissionSet;

pub const SUPER_ADMIN_ROLE: &str = "super_admin";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdminRole {
    pub id: Uuid,
    pub name: String,
    pub permissions: PermissionSet,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Administrator {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
