use sea_orm::entity::prelude::*;

use crate::companies::application::domain::Company;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning profile; empty for companies created from the back-office
    pub user_id: Option<Uuid>,

    pub name: String,

    pub sector: String,

    pub address: Option<String>,

    pub tax_id: Option<String>,

    pub is_verified: bool,

    pub is_premium: bool,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Company {
        Company {
            id: self.id,
            user_id: self.user_id,
            name: self.name.clone(),
            sector: self.sector.clone(),
            address: self.address.clone(),
            tax_id: self.tax_id.clone(),
            is_verified: self.is_verified,
            is_premium: self.is_premium,
            created_at: self.created_at.into(),
        }
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
