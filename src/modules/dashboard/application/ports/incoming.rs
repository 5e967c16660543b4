use async_trait::async_trait;

use crate::dashboard::application::domain::DashboardStats;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DashboardError {
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardUseCase: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats, DashboardError>;
}
