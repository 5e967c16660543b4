use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::{subscription_plans as plans, subscriptions};
use crate::subscriptions::application::{
    domain::{Subscription, SubscriptionPlan, SubscriptionStatus},
    ports::outgoing::{
        NewSubscription, SubscriptionChanges, SubscriptionRepository,
        SubscriptionRepositoryError,
    },
};

#[derive(Debug, Clone)]
pub struct SubscriptionRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SubscriptionRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn plan_names(&self) -> Result<HashMap<Uuid, String>, SubscriptionRepositoryError> {
        Ok(plans::Entity::find()
            .all(&*self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect())
    }

    async fn plan_name(&self, plan_id: Uuid) -> Result<String, SubscriptionRepositoryError> {
        Ok(plans::Entity::find_by_id(plan_id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(|p| p.name)
            .unwrap_or_default())
    }

    async fn with_names(
        &self,
        models: Vec<subscriptions::Model>,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let names = self.plan_names().await?;
        Ok(models
            .into_iter()
            .filter_map(|m| {
                let name = names.get(&m.plan_id).map(String::as_str).unwrap_or_default();
                match m.to_domain(name) {
                    Ok(s) => Some(s),
                    Err(e) => {
                        tracing::warn!("Skipping subscription: {}", e);
                        None
                    }
                }
            })
            .collect())
    }

    async fn single(
        &self,
        model: subscriptions::Model,
    ) -> Result<Subscription, SubscriptionRepositoryError> {
        let name = self.plan_name(model.plan_id).await?;
        model
            .to_domain(&name)
            .map_err(SubscriptionRepositoryError::DatabaseError)
    }
}

fn db_err(err: DbErr) -> SubscriptionRepositoryError {
    SubscriptionRepositoryError::DatabaseError(err.to_string())
}

#[async_trait]
impl SubscriptionRepository for SubscriptionRepositoryPostgres {
    async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>, SubscriptionRepositoryError> {
        let models = plans::Entity::find()
            .order_by_asc(plans::Column::Price)
            .all(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .iter()
            .filter_map(|m| match m.to_domain() {
                Ok(plan) => Some(plan),
                Err(e) => {
                    tracing::warn!("Skipping subscription plan: {}", e);
                    None
                }
            })
            .collect())
    }

    async fn find_plan(
        &self,
        id: Uuid,
    ) -> Result<Option<SubscriptionPlan>, SubscriptionRepositoryError> {
        plans::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(|m| m.to_domain().map_err(SubscriptionRepositoryError::DatabaseError))
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Subscription>, SubscriptionRepositoryError> {
        let models = subscriptions::Entity::find()
            .order_by_desc(subscriptions::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?;
        self.with_names(models).await
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError> {
        let models = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .order_by_desc(subscriptions::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?;
        self.with_names(models).await
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        match subscriptions::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
        {
            Some(model) => self.single(model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn insert(
        &self,
        subscription: NewSubscription,
    ) -> Result<Subscription, SubscriptionRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = subscriptions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(subscription.user_id),
            plan_id: Set(subscription.plan_id),
            status: Set(subscription.status.as_str().to_string()),
            start_date: Set(subscription.start_date.fixed_offset()),
            end_date: Set(subscription.end_date.fixed_offset()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(db_err)?;

        self.single(model).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: SubscriptionStatus,
        changes: SubscriptionChanges,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        let mut update = subscriptions::Entity::update_many()
            .col_expr(subscriptions::Column::Status, Expr::value(changes.status.as_str()))
            .col_expr(subscriptions::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()));
        if let Some(start) = changes.start_date {
            update = update.col_expr(subscriptions::Column::StartDate, Expr::value(start.fixed_offset()));
        }
        if let Some(end) = changes.end_date {
            update = update.col_expr(subscriptions::Column::EndDate, Expr::value(end.fixed_offset()));
        }

        let updated = update
            .filter(subscriptions::Column::Id.eq(id))
            .filter(subscriptions::Column::Status.eq(expected.as_str()))
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_err)?;

        match updated.into_iter().next() {
            Some(model) => self.single(model).await.map(Some),
            None => Ok(None),
        }
    }
}
