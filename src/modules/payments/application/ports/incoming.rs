use async_trait::async_trait;
use uuid::Uuid;

use crate::payments::application::domain::{Payment, PaymentStatus};
use crate::shared::listing::ListQuery;
use crate::shared::status::TransitionError;

/// Upper bound for a single payment, in minor units.
pub const MAX_PAYMENT_AMOUNT: i64 = 100_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentCommandError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Amount must be positive and at most 100000000000 minor units")]
    InvalidAmount,

    #[error("Currency must be a three-letter ISO code")]
    InvalidCurrency,

    #[error("Nothing to update")]
    NoChanges,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePaymentCommand {
    pub user_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub method: String,
    pub transaction_id: Option<String>,
}

impl CreatePaymentCommand {
    pub fn new(
        user_id: Option<Uuid>,
        amount: Option<i64>,
        currency: Option<String>,
        method: Option<String>,
        transaction_id: Option<String>,
    ) -> Result<Self, PaymentCommandError> {
        let user_id = user_id.ok_or(PaymentCommandError::MissingField("user_id"))?;
        let amount = amount.ok_or(PaymentCommandError::MissingField("amount"))?;
        if amount <= 0 || amount > MAX_PAYMENT_AMOUNT {
            return Err(PaymentCommandError::InvalidAmount);
        }

        let currency = currency
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .ok_or(PaymentCommandError::MissingField("currency"))?;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(PaymentCommandError::InvalidCurrency);
        }

        let method = method
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .ok_or(PaymentCommandError::MissingField("method"))?;

        Ok(Self {
            user_id,
            amount,
            currency,
            method,
            transaction_id: transaction_id
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePaymentCommand {
    pub method: Option<String>,
    pub transaction_id: Option<String>,
}

impl UpdatePaymentCommand {
    pub fn new(
        method: Option<String>,
        transaction_id: Option<String>,
    ) -> Result<Self, PaymentCommandError> {
        if method.is_none() && transaction_id.is_none() {
            return Err(PaymentCommandError::NoChanges);
        }

        let method = match method.map(|m| m.trim().to_string()) {
            Some(m) if m.is_empty() => return Err(PaymentCommandError::MissingField("method")),
            other => other,
        };

        Ok(Self {
            method,
            transaction_id: transaction_id.map(|t| t.trim().to_string()),
        })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment not found")]
    NotFound,

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    #[error("Payment status was changed by another request")]
    StatusChanged,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentUseCase: Send + Sync {
    async fn list(&self, query: ListQuery) -> Result<Vec<Payment>, PaymentError>;

    async fn get(&self, id: Uuid) -> Result<Payment, PaymentError>;

    async fn create(&self, command: CreatePaymentCommand) -> Result<Payment, PaymentError>;

    async fn update(&self, id: Uuid, command: UpdatePaymentCommand)
        -> Result<Payment, PaymentError>;

    async fn change_status(&self, id: Uuid, next: PaymentStatus) -> Result<Payment, PaymentError>;

    async fn refund(&self, id: Uuid) -> Result<Payment, PaymentError>;
}
