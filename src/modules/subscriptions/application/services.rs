use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::shared::listing::ListQuery;
use crate::shared::status::StatusMachine;
use crate::subscriptions::application::{
    domain::{Subscription, SubscriptionPlan, SubscriptionStatus},
    ports::{
        incoming::{SubscriptionError, SubscriptionUseCase},
        outgoing::{
            NewSubscription, SubscriptionChanges, SubscriptionRepository,
            SubscriptionRepositoryError,
        },
    },
};

impl From<SubscriptionRepositoryError> for SubscriptionError {
    fn from(err: SubscriptionRepositoryError) -> Self {
        match err {
            SubscriptionRepositoryError::DatabaseError(msg) => SubscriptionError::Internal(msg),
        }
    }
}

pub struct SubscriptionService<R>
where
    R: SubscriptionRepository,
{
    repository: R,
}

impl<R> SubscriptionService<R>
where
    R: SubscriptionRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    async fn plan(&self, id: Uuid) -> Result<SubscriptionPlan, SubscriptionError> {
        self.repository
            .find_plan(id)
            .await?
            .ok_or(SubscriptionError::PlanNotFound)
    }
}

#[async_trait]
impl<R> SubscriptionUseCase for SubscriptionService<R>
where
    R: SubscriptionRepository,
{
    async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>, SubscriptionError> {
        Ok(self
            .repository
            .list_plans()
            .await?
            .into_iter()
            .filter(|p| p.is_active)
            .collect())
    }

    async fn list(&self, query: ListQuery) -> Result<Vec<Subscription>, SubscriptionError> {
        Ok(query.apply(self.repository.list_all().await?))
    }

    async fn create(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Subscription, SubscriptionError> {
        let plan = self.plan(plan_id).await?;
        if !plan.is_active {
            return Err(SubscriptionError::PlanInactive);
        }

        let (start_date, end_date) = plan.period_from(Utc::now());
        Ok(self
            .repository
            .insert(NewSubscription {
                user_id,
                plan_id,
                status: SubscriptionStatus::Active,
                start_date,
                end_date,
            })
            .await?)
    }

    async fn change_status(
        &self,
        id: Uuid,
        next: SubscriptionStatus,
    ) -> Result<Subscription, SubscriptionError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SubscriptionError::NotFound)?;
        let next = current.status.transition(next)?;

        let mut changes = SubscriptionChanges {
            status: next,
            start_date: None,
            end_date: None,
        };
        // Renewing an expired subscription starts a fresh period.
        if current.status == SubscriptionStatus::Expired && next == SubscriptionStatus::Active {
            let plan = self.plan(current.plan_id).await?;
            let (start, end) = plan.period_from(Utc::now());
            changes.start_date = Some(start);
            changes.end_date = Some(end);
        }

        self.repository
            .update_status(id, current.status, changes)
            .await?
            .ok_or(SubscriptionError::StatusChanged)
    }

    async fn check_service_access(
        &self,
        user_id: Uuid,
        service: &str,
    ) -> Result<bool, SubscriptionError> {
        let now = Utc::now();
        let current: Vec<Subscription> = self
            .repository
            .list_by_user(user_id)
            .await?
            .into_iter()
            .filter(|s| s.is_current(now))
            .collect();
        if current.is_empty() {
            return Ok(false);
        }

        let plans = self.repository.list_plans().await?;
        Ok(current.iter().any(|sub| {
            plans
                .iter()
                .any(|plan| plan.id == sub.plan_id && plan.includes(service))
        }))
    }
}
