//! Site-wide settings with a closed schema.
//!
//! Each key has exactly one value type. Values are stored as JSON and checked
//! against the schema both when read back and before being written.
//!
//! `registration_open` gates sign-up and `max_jobs_per_company` caps the open
//! jobs a company may post (see [`SitePolicy`]). `maintenance_mode` is only
//! published for clients to show a banner; the API keeps serving.

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const KNOWN_KEYS: [&str; 6] = [
    "site_name",
    "contact_email",
    "maintenance_mode",
    "registration_open",
    "max_jobs_per_company",
    "default_currency",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingError {
    #[error("unknown setting '{0}'")]
    UnknownKey(String),

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum SettingValue {
    SiteName(String),
    ContactEmail(String),
    MaintenanceMode(bool),
    RegistrationOpen(bool),
    MaxJobsPerCompany(u32),
    DefaultCurrency(String),
}

impl SettingValue {
    pub fn parse(key: &str, value: Value) -> Result<Self, SettingError> {
        if !KNOWN_KEYS.contains(&key) {
            return Err(SettingError::UnknownKey(key.to_string()));
        }

        let invalid = |reason: String| SettingError::InvalidValue {
            key: key.to_string(),
            reason,
        };

        let parsed: SettingValue = serde_json::from_value(json!({ "key": key, "value": value }))
            .map_err(|e| invalid(e.to_string()))?;
        parsed.validate().map_err(invalid)?;
        Ok(parsed)
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            SettingValue::SiteName(name) => {
                let len = name.trim().chars().count();
                if len == 0 || len > 100 {
                    return Err("must be 1 to 100 characters".to_string());
                }
            }
            SettingValue::ContactEmail(email) => {
                if !EmailAddress::is_valid(email) {
                    return Err("not a valid email address".to_string());
                }
            }
            SettingValue::MaxJobsPerCompany(0) => {
                return Err("must be at least 1".to_string());
            }
            SettingValue::DefaultCurrency(code) => {
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                    return Err("must be a three-letter ISO code".to_string());
                }
            }
            SettingValue::MaintenanceMode(_)
            | SettingValue::RegistrationOpen(_)
            | SettingValue::MaxJobsPerCompany(_) => {}
        }
        Ok(())
    }

    pub fn key(&self) -> &'static str {
        match self {
            SettingValue::SiteName(_) => "site_name",
            SettingValue::ContactEmail(_) => "contact_email",
            SettingValue::MaintenanceMode(_) => "maintenance_mode",
            SettingValue::RegistrationOpen(_) => "registration_open",
            SettingValue::MaxJobsPerCompany(_) => "max_jobs_per_company",
            SettingValue::DefaultCurrency(_) => "default_currency",
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            SettingValue::SiteName(s)
            | SettingValue::ContactEmail(s)
            | SettingValue::DefaultCurrency(s) => json!(s),
            SettingValue::MaintenanceMode(b) | SettingValue::RegistrationOpen(b) => json!(b),
            SettingValue::MaxJobsPerCompany(n) => json!(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSetting {
    #[serde(flatten)]
    pub value: SettingValue,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

/// The settings the API itself enforces, with defaults for missing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitePolicy {
    pub registration_open: bool,
    /// `None` means no limit.
    pub max_jobs_per_company: Option<u32>,
}

impl Default for SitePolicy {
    fn default() -> Self {
        Self {
            registration_open: true,
            max_jobs_per_company: None,
        }
    }
}

impl SitePolicy {
    pub fn from_settings(settings: &[SiteSetting]) -> Self {
        settings
            .iter()
            .fold(Self::default(), |mut policy, setting| {
                match setting.value {
                    SettingValue::RegistrationOpen(open) => policy.registration_open = open,
                    SettingValue::MaxJobsPerCompany(max) => {
                        policy.max_jobs_per_company = Some(max)
                    }
                    _ => {}
                }
                policy
            })
    }

    pub fn allows_another_job(&self, open_jobs: usize) -> bool {
        self.max_jobs_per_company
            .map_or(true, |max| open_jobs < max as usize)
    }
}
