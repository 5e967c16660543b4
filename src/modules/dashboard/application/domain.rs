//! Platform-wide counters for the back-office home page.
//!
//! Everything here is a pure reduction over full lists; nothing is cached
//! between requests.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::applications::application::domain::JobApplication;
use crate::auth::application::domain::entities::Account;
use crate::companies::application::domain::Company;
use crate::jobs::application::domain::Job;
use crate::payments::application::domain::{Payment, PaymentStatus};
use crate::subscriptions::application::domain::Subscription;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub total: u64,
    pub active: u64,
    pub by_type: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyStats {
    pub total: u64,
    pub verified: u64,
    pub premium: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobStats {
    pub total: u64,
    pub active: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusCounts {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentStats {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    /// Sum of completed payments, in minor units, keyed by currency.
    /// Saturates at `i64::MAX`.
    pub revenue: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub users: UserStats,
    pub companies: CompanyStats,
    pub jobs: JobStats,
    pub applications: StatusCounts,
    pub payments: PaymentStats,
    pub subscriptions: StatusCounts,
}

/// Everything the dashboard is computed from.
#[derive(Debug, Clone, Default)]
pub struct PlatformSnapshot {
    pub users: Vec<Account>,
    pub companies: Vec<Company>,
    pub jobs: Vec<Job>,
    pub applications: Vec<JobApplication>,
    pub payments: Vec<Payment>,
    pub subscriptions: Vec<Subscription>,
}

fn count_by<T>(items: &[T], key: impl Fn(&T) -> String) -> StatusCounts {
    let mut by_status = BTreeMap::new();
    for item in items {
        *by_status.entry(key(item)).or_insert(0) += 1;
    }
    StatusCounts {
        total: items.len() as u64,
        by_status,
    }
}

pub fn compute_stats(snapshot: &PlatformSnapshot) -> DashboardStats {
    let users = count_by(&snapshot.users, |u| u.user_type.as_str().to_string());
    let applications = count_by(&snapshot.applications, |a| a.status.as_str().to_string());
    let subscriptions = count_by(&snapshot.subscriptions, |s| s.status.as_str().to_string());
    let payments = count_by(&snapshot.payments, |p| p.status.as_str().to_string());

    let mut revenue = BTreeMap::new();
    for payment in snapshot
        .payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Completed)
    {
        let total = revenue.entry(payment.currency.clone()).or_insert(0i64);
        *total = total.saturating_add(payment.amount);
    }

    DashboardStats {
        users: UserStats {
            total: users.total,
            active: snapshot.users.iter().filter(|u| u.is_active).count() as u64,
            by_type: users.by_status,
        },
        companies: CompanyStats {
            total: snapshot.companies.len() as u64,
            verified: snapshot.companies.iter().filter(|c| c.is_verified).count() as u64,
            premium: snapshot.companies.iter().filter(|c| c.is_premium).count() as u64,
        },
        jobs: JobStats {
            total: snapshot.jobs.len() as u64,
            active: snapshot.jobs.iter().filter(|j| j.is_active).count() as u64,
        },
        applications,
        payments: PaymentStats {
            total: payments.total,
            by_status: payments.by_status,
            revenue,
        },
        subscriptions,
    }
}
