use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdminDirectoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read side used by the permission checker.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Raw permission document of the user's role, when the user is an active
    /// administrator holding an active role.
    async fn find_active_permissions(
        &self,
        user_id: Uuid,
    ) -> Result<Option<serde_json::Value>, AdminDirectoryError>;
}
