use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::admin_logs;
use crate::admin::application::{
    domain::{AdminLog, AuditEntry},
    ports::outgoing::{AdminLogFilter, AdminLogRepository, AdminLogRepositoryError},
};

#[derive(Debug, Clone)]
pub struct AdminLogRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AdminLogRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminLogRepository for AdminLogRepositoryPostgres {
    async fn append_batch(&self, entries: Vec<AuditEntry>) -> Result<(), AdminLogRepositoryError> {
        if entries.is_empty() {
            return Ok(());
        }

        let rows = entries.into_iter().map(|e| admin_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            admin_id: Set(e.admin_id),
            action_type: Set(e.action_type),
            target_type: Set(e.target_type),
            target_id: Set(e.target_id),
            details: Set(e.details),
            created_at: Set(e.created_at.fixed_offset()),
        });

        admin_logs::Entity::insert_many(rows)
            .exec_without_returning(&*self.db)
            .await
            .map_err(|e| AdminLogRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn list(&self, filter: &AdminLogFilter) -> Result<Vec<AdminLog>, AdminLogRepositoryError> {
        let mut query = admin_logs::Entity::find().order_by_desc(admin_logs::Column::CreatedAt);

        if let Some(action) = &filter.action_type {
            query = query.filter(admin_logs::Column::ActionType.eq(action.as_str()));
        }
        if let Some(target) = &filter.target_type {
            query = query.filter(admin_logs::Column::TargetType.eq(target.as_str()));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let rows = query
            .all(&*self.db)
            .await
            .map_err(|e| AdminLogRepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(AdminLog::from).collect())
    }
}
