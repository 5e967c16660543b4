use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::{Account, UserType};
use crate::companies::application::domain::Company;
use crate::jobs::application::domain::{Job, JobType};
use crate::payments::application::domain::{Payment, PaymentStatus};

pub fn sample_account(id: Uuid, user_type: UserType) -> Account {
    Account {
        id,
        email: format!("{}@example.com", user_type.as_str()),
        name: "Jane Doe".to_string(),
        user_type,
        is_active: true,
        email_verified: true,
        created_at: Utc::now(),
    }
}

pub fn sample_company(user_id: Option<Uuid>) -> Company {
    Company {
        id: Uuid::new_v4(),
        user_id,
        name: "Acme Recruiting".to_string(),
        sector: "technology".to_string(),
        address: Some("12 rue de la Paix, Paris".to_string()),
        tax_id: None,
        is_verified: false,
        is_premium: false,
        created_at: Utc::now(),
    }
}

/// Active, no deadline: open to applications.
pub fn sample_job(employer_id: Uuid) -> Job {
    Job {
        id: Uuid::new_v4(),
        employer_id,
        title: "Backend Engineer".to_string(),
        description: "Build and run the hiring platform.".to_string(),
        requirements: Some("Rust, PostgreSQL".to_string()),
        salary_min: Some(4_000_000),
        salary_max: Some(5_500_000),
        location: "Paris".to_string(),
        job_type: JobType::FullTime,
        is_active: true,
        deadline: None,
        created_at: Utc::now(),
    }
}

/// Five payments: two completed, one pending, one failed, one refunded.
pub fn payments_fixture() -> Vec<Payment> {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    [
        (PaymentStatus::Completed, 4_900, "card"),
        (PaymentStatus::Pending, 9_900, "transfer"),
        (PaymentStatus::Completed, 9_900, "card"),
        (PaymentStatus::Failed, 4_900, "card"),
        (PaymentStatus::Refunded, 19_900, "paypal"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (status, amount, method))| Payment {
        id: Uuid::new_v4(),
        user_id,
        amount,
        currency: "EUR".to_string(),
        status,
        method: method.to_string(),
        transaction_id: Some(format!("TXN-{:04}", i + 1)),
        created_at: now - Duration::days(i as i64),
    })
    .collect()
}
