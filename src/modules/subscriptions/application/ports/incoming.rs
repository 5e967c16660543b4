use async_trait::async_trait;
use uuid::Uuid;

use crate::shared::listing::ListQuery;
use crate::shared::status::TransitionError;
use crate::subscriptions::application::domain::{
    Subscription, SubscriptionPlan, SubscriptionStatus,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum SubscriptionError {
    #[error("Subscription plan not found")]
    PlanNotFound,

    #[error("Subscription plan is no longer offered")]
    PlanInactive,

    #[error("Subscription not found")]
    NotFound,

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    #[error("Subscription status was changed by another request")]
    StatusChanged,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionUseCase: Send + Sync {
    async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>, SubscriptionError>;

    async fn list(&self, query: ListQuery) -> Result<Vec<Subscription>, SubscriptionError>;

    /// Starts an active subscription now, ending after the plan's duration.
    async fn create(&self, user_id: Uuid, plan_id: Uuid)
        -> Result<Subscription, SubscriptionError>;

    async fn change_status(
        &self,
        id: Uuid,
        next: SubscriptionStatus,
    ) -> Result<Subscription, SubscriptionError>;

    async fn check_service_access(
        &self,
        user_id: Uuid,
        service: &str,
    ) -> Result<bool, SubscriptionError>;
}
