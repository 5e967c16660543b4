use async_trait::async_trait;
use uuid::Uuid;

use crate::payments::application::{
    domain::{Payment, PaymentStatus},
    ports::{
        incoming::{CreatePaymentCommand, PaymentError, PaymentUseCase, UpdatePaymentCommand},
        outgoing::{NewPayment, PaymentChanges, PaymentRepository, PaymentRepositoryError},
    },
};
use crate::shared::listing::ListQuery;
use crate::shared::status::StatusMachine;

impl From<PaymentRepositoryError> for PaymentError {
    fn from(err: PaymentRepositoryError) -> Self {
        match err {
            PaymentRepositoryError::DatabaseError(msg) => PaymentError::Internal(msg),
        }
    }
}

pub struct PaymentService<R>
where
    R: PaymentRepository,
{
    repository: R,
}

impl<R> PaymentService<R>
where
    R: PaymentRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> PaymentUseCase for PaymentService<R>
where
    R: PaymentRepository,
{
    async fn list(&self, query: ListQuery) -> Result<Vec<Payment>, PaymentError> {
        Ok(query.apply(self.repository.list_all().await?))
    }

    async fn get(&self, id: Uuid) -> Result<Payment, PaymentError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PaymentError::NotFound)
    }

    async fn create(&self, command: CreatePaymentCommand) -> Result<Payment, PaymentError> {
        Ok(self
            .repository
            .insert(NewPayment {
                user_id: command.user_id,
                amount: command.amount,
                currency: command.currency,
                method: command.method,
                transaction_id: command.transaction_id,
            })
            .await?)
    }

    async fn update(
        &self,
        id: Uuid,
        command: UpdatePaymentCommand,
    ) -> Result<Payment, PaymentError> {
        self.repository
            .update(
                id,
                PaymentChanges {
                    method: command.method,
                    transaction_id: command.transaction_id,
                },
            )
            .await?
            .ok_or(PaymentError::NotFound)
    }

    async fn change_status(&self, id: Uuid, next: PaymentStatus) -> Result<Payment, PaymentError> {
        let current = self.get(id).await?;
        let next = current.status.transition(next)?;

        let updated = self
            .repository
            .transition_status(id, current.status, next)
            .await?
            .ok_or(PaymentError::StatusChanged)?;

        tracing::info!(payment_id = %id, from = %current.status, to = %next, "Payment status changed");
        Ok(updated)
    }

    async fn refund(&self, id: Uuid) -> Result<Payment, PaymentError> {
        self.change_status(id, PaymentStatus::Refunded).await
    }
}
