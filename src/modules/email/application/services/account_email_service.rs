use async_trait::async_trait;

use crate::auth::application::domain::entities::Account;
use crate::email::application::{
    ports::outgoing::{AccountNotifier, EmailSender, NotificationError},
    templates::{admin_invitation_email, admin_notification_email, welcome_email, EmailContent},
};

#[derive(Clone)]
pub struct AccountEmailService<S>
where
    S: EmailSender,
{
    sender: S,
    app_base_url: String,
}

impl<S> AccountEmailService<S>
where
    S: EmailSender,
{
    pub fn new(sender: S, app_base_url: impl Into<String>) -> Self {
        Self {
            sender,
            app_base_url: app_base_url.into(),
        }
    }

    async fn deliver(&self, to: &str, content: EmailContent) -> Result<(), NotificationError> {
        self.sender
            .send_email(to, &content.subject, &content.html)
            .await
            .map_err(NotificationError::EmailSendingFailed)
    }
}

#[async_trait]
impl<S> AccountNotifier for AccountEmailService<S>
where
    S: EmailSender,
{
    async fn send_welcome(&self, account: &Account) -> Result<(), NotificationError> {
        self.deliver(&account.email, welcome_email(&account.name, account.user_type))
            .await
    }

    async fn send_admin_invitation(
        &self,
        email: &str,
        name: &str,
        role_name: &str,
    ) -> Result<(), NotificationError> {
        let link = format!("{}/admin", self.app_base_url.trim_end_matches('/'));
        self.deliver(email, admin_invitation_email(name, role_name, &link))
            .await
    }

    async fn send_admin_notification(
        &self,
        email: &str,
        title: &str,
        lines: &[String],
    ) -> Result<(), NotificationError> {
        self.deliver(email, admin_notification_email(title, lines))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserType;
    use crate::email::adapter::outgoing::memory_sender::InMemoryEmailSender;
    use chrono::Utc;
    use uuid::Uuid;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            user_type: UserType::Candidate,
            is_active: true,
            email_verified: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn welcome_goes_to_account_email() {
        let sender = InMemoryEmailSender::default();
        let service = AccountEmailService::new(sender.clone(), "https://app.example.com");

        service.send_welcome(&account()).await.unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@example.com");
        assert!(sent[0].body.contains("Welcome, Jane!"));
    }

    #[tokio::test]
    async fn invitation_links_to_back_office() {
        let sender = InMemoryEmailSender::default();
        let service = AccountEmailService::new(sender.clone(), "https://app.example.com/");

        service
            .send_admin_invitation("sam@example.com", "Sam", "moderator")
            .await
            .unwrap();

        let sent = sender.sent();
        assert!(sent[0].body.contains("https://app.example.com/admin"));
    }

    #[tokio::test]
    async fn sender_failure_is_reported() {
        let sender = InMemoryEmailSender::failing("SMTP down");
        let service = AccountEmailService::new(sender, "https://app.example.com");

        let result = service
            .send_admin_notification("jane@example.com", "Update", &[])
            .await;

        assert!(matches!(
            result,
            Err(NotificationError::EmailSendingFailed(msg)) if msg == "SMTP down"
        ));
    }
}
