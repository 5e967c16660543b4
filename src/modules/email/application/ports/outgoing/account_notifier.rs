use async_trait::async_trait;

use crate::auth::application::domain::entities::Account;

#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Transactional emails sent to accounts and administrators.
#[async_trait]
pub trait AccountNotifier: Send + Sync {
    async fn send_welcome(&self, account: &Account) -> Result<(), NotificationError>;

    async fn send_admin_invitation(
        &self,
        email: &str,
        name: &str,
        role_name: &str,
    ) -> Result<(), NotificationError>;

    async fn send_admin_notification(
        &self,
        email: &str,
        title: &str,
        lines: &[String],
    ) -> Result<(), NotificationError>;
}
