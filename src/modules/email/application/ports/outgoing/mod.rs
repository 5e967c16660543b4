pub mod account_notifier;
pub mod email_sender;

pub use account_notifier::{AccountNotifier, NotificationError};
pub use email_sender::EmailSender;
