use sea_orm::entity::prelude::*;

use crate::payments::application::domain::{Payment, PaymentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    pub amount: i64,

    pub currency: String,

    pub status: String,

    pub method: String,

    pub transaction_id: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Result<Payment, String> {
        let status: PaymentStatus = self
            .status
            .parse()
            .map_err(|e| format!("payment {}: {}", self.id, e))?;

        Ok(Payment {
            id: self.id,
            user_id: self.user_id,
            amount: self.amount,
            currency: self.currency.clone(),
            status,
            method: self.method.clone(),
            transaction_id: self.transaction_id.clone(),
            created_at: self.created_at.into(),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        #[cfg(feature = "no_db_triggers")]
        {
            use chrono::Utc;
            use sea_orm::ActiveValue::Set;

            if !_insert {
                self.updated_at = Set(Utc::now().into());
            }
        }

        Ok(self)
    }
}
