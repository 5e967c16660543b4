use sea_orm::entity::prelude::*;

use crate::admin::application::domain::AdminLog;

/// Append-only; rows are never updated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub admin_id: Uuid,

    pub action_type: String,

    pub target_type: String,

    pub target_id: Option<Uuid>,

    pub details: Json,

    pub created_at: DateTimeWithTimeZone,
}

impl From<Model> for AdminLog {
    fn from(m: Model) -> Self {
        AdminLog {
            id: m.id,
            admin_id: m.admin_id,
            action_type: m.action_type,
            target_type: m.target_type,
            target_id: m.target_id,
            details: m.details,
            created_at: m.created_at.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
