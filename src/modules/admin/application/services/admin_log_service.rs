use async_trait::async_trait;

use crate::admin::application::{
    domain::AdminLog,
    ports::{
        incoming::{AdminLogError, AdminLogUseCase},
        outgoing::{AdminLogFilter, AdminLogRepository},
    },
};

pub const MAX_LOG_PAGE: u64 = 500;

pub struct AdminLogService<R>
where
    R: AdminLogRepository,
{
    repository: R,
}

impl<R> AdminLogService<R>
where
    R: AdminLogRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> AdminLogUseCase for AdminLogService<R>
where
    R: AdminLogRepository,
{
    async fn list_logs(&self, mut filter: AdminLogFilter) -> Result<Vec<AdminLog>, AdminLogError> {
        filter.limit = Some(filter.limit.unwrap_or(100).clamp(1, MAX_LOG_PAGE));
        filter.action_type = filter.action_type.filter(|s| !s.trim().is_empty());
        filter.target_type = filter.target_type.filter(|s| !s.trim().is_empty());

        self.repository
            .list(&filter)
            .await
            .map_err(|e| AdminLogError::Internal(e.to_string()))
    }
}
