use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::warn;
use uuid::Uuid;

use crate::admin::application::{
    domain::{Permission, PermissionDecision, PermissionSet},
    ports::{incoming::PermissionChecker, outgoing::AdminDirectory},
};

#[derive(Clone)]
pub struct PermissionService<D>
where
    D: AdminDirectory,
{
    directory: D,
}

impl<D> PermissionService<D>
where
    D: AdminDirectory,
{
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub async fn decide(&self, user_id: Uuid, permission: Permission) -> PermissionDecision {
        let raw = match self.directory.find_active_permissions(user_id).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return PermissionDecision::Denied,
            Err(e) => return PermissionDecision::CheckFailed(e.to_string()),
        };

        match PermissionSet::from_json(raw) {
            Ok(set) if set.allows(permission) => PermissionDecision::Granted,
            Ok(_) => PermissionDecision::Denied,
            Err(e) => PermissionDecision::CheckFailed(e.to_string()),
        }
    }
}

#[async_trait]
impl<D> PermissionChecker for PermissionService<D>
where
    D: AdminDirectory,
{
    async fn has_permission(&self, user_id: Uuid, permission: Permission) -> bool {
        match self.decide(user_id, permission).await {
            PermissionDecision::Granted => true,
            PermissionDecision::Denied => false,
            PermissionDecision::CheckFailed(reason) => {
                warn!(
                    user_id = %user_id,
                    permission = %permission,
                    "Permission check failed, denying: {}",
                    reason
                );
                false
            }
        }
    }

    async fn check_many(
        &self,
        user_id: Uuid,
        permissions: &[Permission],
    ) -> BTreeMap<Permission, bool> {
        let mut result = BTreeMap::new();
        for &permission in permissions {
            result.insert(permission, self.has_permission(user_id, permission).await);
        }
        result
    }
}
