use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity as payments;
use crate::payments::application::{
    domain::{Payment, PaymentStatus},
    ports::outgoing::{NewPayment, PaymentChanges, PaymentRepository, PaymentRepositoryError},
};

#[derive(Debug, Clone)]
pub struct PaymentRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PaymentRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> PaymentRepositoryError {
    PaymentRepositoryError::DatabaseError(err.to_string())
}

fn to_payment(model: payments::Model) -> Result<Payment, PaymentRepositoryError> {
    model.to_domain().map_err(PaymentRepositoryError::DatabaseError)
}

#[async_trait]
impl PaymentRepository for PaymentRepositoryPostgres {
    async fn list_all(&self) -> Result<Vec<Payment>, PaymentRepositoryError> {
        let models = payments::Entity::find()
            .order_by_desc(payments::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .filter_map(|m| match m.to_domain() {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!("Skipping payment: {}", e);
                    None
                }
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, PaymentRepositoryError> {
        payments::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(to_payment)
            .transpose()
    }

    async fn insert(&self, payment: NewPayment) -> Result<Payment, PaymentRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(payment.user_id),
            amount: Set(payment.amount),
            currency: Set(payment.currency),
            status: Set(PaymentStatus::Pending.as_str().to_string()),
            method: Set(payment.method),
            transaction_id: Set(payment.transaction_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(db_err)?;

        to_payment(model)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: PaymentChanges,
    ) -> Result<Option<Payment>, PaymentRepositoryError> {
        let Some(existing) = payments::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(method) = changes.method {
            active.method = Set(method);
        }
        if let Some(transaction_id) = changes.transaction_id {
            active.transaction_id = Set(Some(transaction_id).filter(|t| !t.is_empty()));
        }

        let updated = active.update(&*self.db).await.map_err(db_err)?;
        to_payment(updated).map(Some)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        expected: PaymentStatus,
        next: PaymentStatus,
    ) -> Result<Option<Payment>, PaymentRepositoryError> {
        let updated = payments::Entity::update_many()
            .col_expr(payments::Column::Status, Expr::value(next.as_str()))
            .col_expr(payments::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(payments::Column::Id.eq(id))
            .filter(payments::Column::Status.eq(expected.as_str()))
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_err)?;

        updated.into_iter().next().map(to_payment).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn row(status: &str) -> payments::Model {
        let now = Utc::now().fixed_offset();
        payments::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: 4900,
            currency: "EUR".to_string(),
            status: status.to_string(),
            method: "card".to_string(),
            transaction_id: Some("TXN-1".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn new_payment_starts_pending() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row("pending")]])
            .into_connection();
        let repo = PaymentRepositoryPostgres::new(Arc::new(db));

        let payment = repo
            .insert(NewPayment {
                user_id: Uuid::new_v4(),
                amount: 4900,
                currency: "EUR".to_string(),
                method: "card".to_string(),
                transaction_id: None,
            })
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn update_of_missing_payment_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<payments::Model>::new()])
            .into_connection();
        let repo = PaymentRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .update(Uuid::new_v4(), PaymentChanges::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn status_change_is_persisted() {
        let after = row("refunded");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![after.clone()]])
            .into_connection();
        let repo = PaymentRepositoryPostgres::new(Arc::new(db));

        let updated = repo
            .transition_status(after.id, PaymentStatus::Completed, PaymentStatus::Refunded)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, PaymentStatus::Refunded);
    }

    #[tokio::test]
    async fn stale_expected_status_updates_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<payments::Model>::new()])
            .into_connection();
        let repo = PaymentRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .transition_status(Uuid::new_v4(), PaymentStatus::Pending, PaymentStatus::Failed)
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
