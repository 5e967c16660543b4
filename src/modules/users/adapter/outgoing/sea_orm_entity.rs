use sea_orm::entity::prelude::*;

use crate::auth::application::domain::entities::{Account, UserType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,

    pub name: String,

    pub user_type: String,

    pub password_hash: String,

    pub is_active: bool,

    pub email_verified: bool,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_account(&self) -> Result<Account, String> {
        let user_type: UserType = self
            .user_type
            .parse()
            .map_err(|e| format!("profile {}: {}", self.id, e))?;

        Ok(Account {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            user_type,
            is_active: self.is_active,
            email_verified: self.email_verified,
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
