use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::status::UnknownStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Candidate,
    Company,
    Student,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Candidate => "candidate",
            UserType::Company => "company",
            UserType::Student => "student",
            UserType::Admin => "admin",
        }
    }

    /// Admin accounts are appointed, never chosen at sign-up.
    pub fn is_self_selectable(&self) -> bool {
        !matches!(self, UserType::Admin)
    }

    /// Candidate and student accounts own a candidate (CV) row.
    pub fn has_candidate_profile(&self) -> bool {
        matches!(self, UserType::Candidate | UserType::Student)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candidate" => Ok(UserType::Candidate),
            "company" => Ok(UserType::Company),
            "student" => Ok(UserType::Student),
            "admin" => Ok(UserType::Admin),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A profile as seen by the session layer.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub user_type: UserType,
    pub is_active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub account: Account,
    pub password_hash: String,
}
