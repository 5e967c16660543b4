use sea_orm::entity::prelude::*;

use crate::admin::application::domain::{AdminRole, PermissionSet};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub name: String,

    /// `{"version": 1, "grants": [...]}`
    pub permissions: Json,

    pub is_active: bool,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Result<AdminRole, String> {
        let permissions = PermissionSet::from_json(self.permissions.clone())
            .map_err(|e| format!("admin role {}: {}", self.name, e))?;

        Ok(AdminRole {
            id: self.id,
            name: self.name.clone(),
            permissions,
            is_active: self.is_active,
            created_at: self.created_at.into(),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
