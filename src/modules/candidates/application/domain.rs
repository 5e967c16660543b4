use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::listing::Listable;

/// CV-repository entry attached to a candidate or student account.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Candidate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub cv_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Listable for Candidate {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn status_key(&self) -> Option<&str> {
        Some(if self.cv_url.is_some() { "with_cv" } else { "without_cv" })
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
