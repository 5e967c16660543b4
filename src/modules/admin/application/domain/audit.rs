use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// One back-office action waiting to be written to `admin_logs`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub admin_id: Uuid,
    pub action_type: String,
    pub target_type: String,
    pub target_id: Option<Uuid>,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        admin_id: Uuid,
        action_type: impl Into<String>,
        target_type: impl Into<String>,
        target_id: Option<Uuid>,
    ) -> Self {
        Self {
            admin_id,
            action_type: action_type.into(),
            target_type: target_type.into(),
            target_id,
            details: Value::Object(Default::default()),
            created_at: Utc::now(),
        }
    }

    /// Details are always stored as a JSON object.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = match details {
            Value::Object(_) => details,
            Value::Null => Value::Object(Default::default()),
            other => serde_json::json!({ "value": other }),
        };
        self
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminLog {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub action_type: String,
    pub target_type: String,
    pub target_id: Option<Uuid>,
    #[schema(value_type = Object)]
    pub details: Value,
    pub created_at: DateTime<Utc>,
}
