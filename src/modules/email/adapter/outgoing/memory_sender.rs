use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::email::application::ports::outgoing::EmailSender;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Keeps every message in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmailSender {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail_with: Option<String>,
}

impl InMemoryEmailSender {
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Arc::default(),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmailSender for InMemoryEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }

        self.sent
            .lock()
            .map_err(|_| "mailbox poisoned".to_string())?
            .push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}
