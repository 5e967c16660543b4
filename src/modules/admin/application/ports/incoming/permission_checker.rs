use async_trait::async_trait;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::admin::application::domain::Permission;

/// Answers "may this user do X" against the database, every time it is asked.
///
/// Failures never surface to the caller: a lookup that cannot be completed
/// answers `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn has_permission(&self, user_id: Uuid, permission: Permission) -> bool;

    async fn check_many(
        &self,
        user_id: Uuid,
        permissions: &[Permission],
    ) -> BTreeMap<Permission, bool>;
}
