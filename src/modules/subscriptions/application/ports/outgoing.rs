use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::subscriptions::application::domain::{
    Subscription, SubscriptionPlan, SubscriptionStatus,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum SubscriptionRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// New status, plus a fresh period when the subscription is renewed.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionChanges {
    pub status: SubscriptionStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>, SubscriptionRepositoryError>;

    async fn find_plan(
        &self,
        id: Uuid,
    ) -> Result<Option<SubscriptionPlan>, SubscriptionRepositoryError>;

    async fn list_all(&self) -> Result<Vec<Subscription>, SubscriptionRepositoryError>;

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError>;

    async fn insert(
        &self,
        subscription: NewSubscription,
    ) -> Result<Subscription, SubscriptionRepositoryError>;

    /// Applies `changes` only while the stored status is still `expected`.
    /// `None` when the subscription is missing or was moved by someone else.
    async fn update_status(
        &self,
        id: Uuid,
        expected: SubscriptionStatus,
        changes: SubscriptionChanges,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError>;
}
