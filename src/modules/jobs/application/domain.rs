use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::listing::Listable;
use crate::shared::status::UnknownStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
    Freelance,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Freelance => "freelance",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_time" => Ok(JobType::FullTime),
            "part_time" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "internship" => Ok(JobType::Internship),
            "freelance" => Ok(JobType::Freelance),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A job offer published by a company. Salaries are in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Job {
    pub id: Uuid,
    /// Owning company (companies.id)
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: String,
    pub job_type: JobType,
    pub is_active: bool,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Active and not past its deadline.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.deadline.map_or(true, |d| d >= now)
    }
}

impl Listable for Job {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.location.as_str(), self.description.as_str()]
    }

    fn status_key(&self) -> Option<&str> {
        Some(if self.is_active { "active" } else { "inactive" })
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn job(is_active: bool, deadline: Option<DateTime<Utc>>) -> Job {
        Job {
            id: Uuid::new_v4(),
            employer_id: Uuid::new_v4(),
            title: "Rust developer".to_string(),
            description: "Build services".to_string(),
            requirements: None,
            salary_min: None,
            salary_max: None,
            location: "Lyon".to_string(),
            job_type: JobType::FullTime,
            is_active,
            deadline,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn open_until_deadline() {
        let now = Utc::now();

        assert!(job(true, None).is_open(now));
        assert!(job(true, Some(now + Duration::days(1))).is_open(now));
        assert!(!job(true, Some(now - Duration::days(1))).is_open(now));
        assert!(!job(false, None).is_open(now));
    }

    #[test]
    fn job_type_parses_stored_values() {
        assert_eq!("part_time".parse::<JobType>(), Ok(JobType::PartTime));
        assert!("temp".parse::<JobType>().is_err());
    }
}
