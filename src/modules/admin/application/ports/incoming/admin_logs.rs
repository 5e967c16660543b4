use async_trait::async_trait;

use crate::admin::application::domain::AdminLog;
use crate::admin::application::ports::outgoing::AdminLogFilter;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdminLogError {
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminLogUseCase: Send + Sync {
    async fn list_logs(&self, filter: AdminLogFilter) -> Result<Vec<AdminLog>, AdminLogError>;
}
