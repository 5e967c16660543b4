use async_trait::async_trait;
use serde::Deserialize;

use crate::admin::application::domain::{AdminLog, AuditEntry};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdminLogRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminLogFilter {
    pub action_type: Option<String>,
    pub target_type: Option<String>,
    pub limit: Option<u64>,
}

#[async_trait]
pub trait AdminLogRepository: Send + Sync {
    async fn append_batch(&self, entries: Vec<AuditEntry>) -> Result<(), AdminLogRepositoryError>;

    /// Newest first.
    async fn list(&self, filter: &AdminLogFilter) -> Result<Vec<AdminLog>, AdminLogRepositoryError>;
}
