use crate::admin::application::domain::AuditEntry;

/// Fire-and-forget audit trail. Never blocks and never fails the caller.
pub trait AuditLogger: Send + Sync {
    fn log_action(&self, entry: AuditEntry);
}
