use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::shared::status::UnknownStatus;

/// Back-office capability. Closed set; stored rows naming anything else are rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ManageUsers,
    ManageCompanies,
    ManageJobs,
    ManagePayments,
    ManageSubscriptions,
    ManageSettings,
    ManageAdmins,
    ViewLogs,
}

impl Permission {
    pub const ALL: [Permission; 9] = [
        Permission::ViewDashboard,
        Permission::ManageUsers,
        Permission::ManageCompanies,
        Permission::ManageJobs,
        Permission::ManagePayments,
        Permission::ManageSubscriptions,
        Permission::ManageSettings,
        Permission::ManageAdmins,
        Permission::ViewLogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ManageUsers => "manage_users",
            Permission::ManageCompanies => "manage_companies",
            Permission::ManageJobs => "manage_jobs",
            Permission::ManagePayments => "manage_payments",
            Permission::ManageSubscriptions => "manage_subscriptions",
            Permission::ManageSettings => "manage_settings",
            Permission::ManageAdmins => "manage_admins",
            Permission::ViewLogs => "view_logs",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionSetError {
    #[error("unsupported permission set version {0}")]
    UnsupportedVersion(u32),

    #[error("malformed permission set: {0}")]
    Malformed(String),
}

/// Grants attached to an admin role, as persisted in `admin_roles.permissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PermissionSet {
    pub version: u32,
    pub grants: BTreeSet<Permission>,
}

impl PermissionSet {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(grants: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            grants: grants.into_iter().collect(),
        }
    }

    pub fn all() -> Self {
        Self::new(Permission::ALL)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, PermissionSetError> {
        let set: PermissionSet = serde_json::from_value(value)
            .map_err(|e| PermissionSetError::Malformed(e.to_string()))?;
        if set.version != Self::CURRENT_VERSION {
            return Err(PermissionSetError::UnsupportedVersion(set.version));
        }
        Ok(set)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "version": self.version,
            "grants": self.grants.iter().map(Permission::as_str).collect::<Vec<_>>(),
        })
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.grants.contains(&permission)
    }
}

/// Outcome of one permission lookup. Only `Granted` opens the door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied,
    CheckFailed(String),
}

impl PermissionDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionDecision::Granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_current_version() {
        let set = PermissionSet::from_json(json!({
            "version": 1,
            "grants": ["manage_users", "view_logs"]
        }))
        .unwrap();

        assert!(set.allows(Permission::ManageUsers));
        assert!(set.allows(Permission::ViewLogs));
        assert!(!set.allows(Permission::ManageAdmins));
    }

    #[test]
    fn unknown_grant_is_malformed() {
        let result = PermissionSet::from_json(json!({
            "version": 1,
            "grants": ["manage_everything"]
        }));

        assert!(matches!(result, Err(PermissionSetError::Malformed(_))));
    }

    #[test]
    fn legacy_flat_object_is_malformed() {
        let result = PermissionSet::from_json(json!({ "manage_users": true }));
        assert!(matches!(result, Err(PermissionSetError::Malformed(_))));
    }

    #[test]
    fn future_version_is_rejected() {
        let result = PermissionSet::from_json(json!({ "version": 2, "grants": [] }));
        assert_eq!(result, Err(PermissionSetError::UnsupportedVersion(2)));
    }

    #[test]
    fn json_form_reads_back() {
        let set = PermissionSet::new([Permission::ManageJobs, Permission::ViewDashboard]);

        let value = set.to_json();

        assert_eq!(value["grants"], json!(["view_dashboard", "manage_jobs"]));
        assert_eq!(PermissionSet::from_json(value).unwrap(), set);
    }

    #[test]
    fn permission_names_parse() {
        assert_eq!("manage_payments".parse::<Permission>(), Ok(Permission::ManagePayments));
        assert!("root".parse::<Permission>().is_err());
    }
}
