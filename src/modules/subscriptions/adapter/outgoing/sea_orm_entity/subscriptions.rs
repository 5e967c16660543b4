use sea_orm::entity::prelude::*;

use crate::subscriptions::application::domain::{Subscription, SubscriptionStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    pub plan_id: Uuid,

    pub status: String,

    pub start_date: DateTimeWithTimeZone,

    pub end_date: DateTimeWithTimeZone,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self, plan_name: &str) -> Result<Subscription, String> {
        let status: SubscriptionStatus = self
            .status
            .parse()
            .map_err(|e| format!("subscription {}: {}", self.id, e))?;

        Ok(Subscription {
            id: self.id,
            user_id: self.user_id,
            plan_id: self.plan_id,
            plan_name: plan_name.to_string(),
            status,
            start_date: self.start_date.into(),
            end_date: self.end_date.into(),
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
