use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::admin::application::domain::{AuditEntry, Permission};
use crate::admin::application::ports::incoming::{AuditLogger, PermissionChecker};

/// Grants exactly the listed permissions to every user.
#[derive(Debug, Clone, Default)]
pub struct GrantOnly(pub Vec<Permission>);

#[async_trait]
impl PermissionChecker for GrantOnly {
    async fn has_permission(&self, _user_id: Uuid, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    async fn check_many(
        &self,
        _user_id: Uuid,
        permissions: &[Permission],
    ) -> BTreeMap<Permission, bool> {
        permissions
            .iter()
            .map(|p| (*p, self.0.contains(p)))
            .collect()
    }
}

/// Keeps every audit entry in memory, in call order.
#[derive(Debug, Default)]
pub struct RecordingAuditLogger {
    entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingAuditLogger {
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl AuditLogger for RecordingAuditLogger {
    fn log_action(&self, entry: AuditEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}
