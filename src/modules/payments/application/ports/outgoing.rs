use async_trait::async_trait;
use uuid::Uuid;

use crate::payments::application::domain::{Payment, PaymentStatus};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub user_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub method: String,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentChanges {
    pub method: Option<String>,
    pub transaction_id: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Payment>, PaymentRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, PaymentRepositoryError>;

    async fn insert(&self, payment: NewPayment) -> Result<Payment, PaymentRepositoryError>;

    async fn update(
        &self,
        id: Uuid,
        changes: PaymentChanges,
    ) -> Result<Option<Payment>, PaymentRepositoryError>;

    /// Writes `next` only while the stored status is still `expected`.
    /// `None` when the payment is missing or was moved by someone else.
    async fn transition_status(
        &self,
        id: Uuid,
        expected: PaymentStatus,
        next: PaymentStatus,
    ) -> Result<Option<Payment>, PaymentRepositoryError>;
}
