use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::listing::Listable;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Company {
    pub id: Uuid,
    /// Owning company account, if any
    pub user_id: Option<Uuid>,
    pub name: String,
    pub sector: String,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub is_verified: bool,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

impl Listable for Company {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.sector.as_str()]
    }

    fn status_key(&self) -> Option<&str> {
        Some(if self.is_verified { "verified" } else { "unverified" })
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
