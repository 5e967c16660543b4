//! Profiles as seen from the back-office. The profile itself is the auth
//! [`Account`]; this module only adds list behaviour on top of it.

use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::Account;
use crate::shared::listing::Listable;

impl Listable for Account {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.email.as_str(), self.name.as_str()]
    }

    fn status_key(&self) -> Option<&str> {
        Some(if self.is_active { "active" } else { "inactive" })
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
