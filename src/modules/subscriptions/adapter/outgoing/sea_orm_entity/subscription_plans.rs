use sea_orm::entity::prelude::*;

use crate::subscriptions::application::domain::SubscriptionPlan;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub name: String,

    pub price: i64,

    pub currency: String,

    pub duration_days: i32,

    /// JSON array of service keys
    pub services: Json,

    pub is_active: bool,
}

impl Model {
    pub fn to_domain(&self) -> Result<SubscriptionPlan, String> {
        let services: Vec<String> = serde_json::from_value(self.services.clone())
            .map_err(|e| format!("plan {}: bad services list: {}", self.id, e))?;

        Ok(SubscriptionPlan {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            currency: self.currency.clone(),
            duration_days: self.duration_days,
            services,
            is_active: self.is_active,
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
