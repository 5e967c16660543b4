use async_trait::async_trait;
use uuid::Uuid;

use super::AccountRepositoryError;

/// Whether a token's subject may still act. Consulted on every authenticated request.
#[async_trait]
pub trait AccountStatusLookup: Send + Sync {
    /// `false` for deactivated or deleted profiles.
    async fn is_active(&self, user_id: Uuid) -> Result<bool, AccountRepositoryError>;
}
