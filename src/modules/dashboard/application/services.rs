use async_trait::async_trait;
use futures::try_join;
use std::fmt::Display;
use std::sync::Arc;

use crate::applications::application::ports::outgoing::ApplicationRepository;
use crate::companies::application::ports::outgoing::CompanyRepository;
use crate::dashboard::application::domain::{compute_stats, DashboardStats, PlatformSnapshot};
use crate::dashboard::application::ports::incoming::{DashboardError, DashboardUseCase};
use crate::jobs::application::ports::outgoing::JobRepository;
use crate::payments::application::ports::outgoing::PaymentRepository;
use crate::subscriptions::application::ports::outgoing::SubscriptionRepository;
use crate::users::application::ports::outgoing::UserRepository;

fn internal(source: &str, err: impl Display) -> DashboardError {
    DashboardError::Internal(format!("{}: {}", source, err))
}

pub struct DashboardService {
    users: Arc<dyn UserRepository>,
    companies: Arc<dyn CompanyRepository>,
    jobs: Arc<dyn JobRepository>,
    applications: Arc<dyn ApplicationRepository>,
    payments: Arc<dyn PaymentRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        companies: Arc<dyn CompanyRepository>,
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
        payments: Arc<dyn PaymentRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            users,
            companies,
            jobs,
            applications,
            payments,
            subscriptions,
        }
    }

    async fn snapshot(&self) -> Result<PlatformSnapshot, DashboardError> {
        let (users, companies, jobs, applications, payments, subscriptions) = try_join!(
            async { self.users.list_all().await.map_err(|e| internal("users", e)) },
            async { self.companies.list_all().await.map_err(|e| internal("companies", e)) },
            async { self.jobs.list_all().await.map_err(|e| internal("jobs", e)) },
            async {
                self.applications
                    .list_all()
                    .await
                    .map_err(|e| internal("applications", e))
            },
            async { self.payments.list_all().await.map_err(|e| internal("payments", e)) },
            async {
                self.subscriptions
                    .list_all()
                    .await
                    .map_err(|e| internal("subscriptions", e))
            },
        )?;

        Ok(PlatformSnapshot {
            users,
            companies,
            jobs,
            applications,
            payments,
            subscriptions,
        })
    }
}

#[async_trait]
impl DashboardUseCase for DashboardService {
    async fn stats(&self) -> Result<DashboardStats, DashboardError> {
        let snapshot = self.snapshot().await?;
        Ok(compute_stats(&snapshot))
    }
}
