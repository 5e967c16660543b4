use sea_orm::entity::prelude::*;

use crate::jobs::application::domain::{Job, JobType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub employer_id: Uuid,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub requirements: Option<String>,

    pub salary_min: Option<i64>,

    pub salary_max: Option<i64>,

    pub location: String,

    pub job_type: String,

    pub is_active: bool,

    pub deadline: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Result<Job, String> {
        let job_type: JobType = self
            .job_type
            .parse()
            .map_err(|e| format!("job {}: {}", self.id, e))?;

        Ok(Job {
            id: self.id,
            employer_id: self.employer_id,
            title: self.title.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            location: self.location.clone(),
            job_type,
            is_active: self.is_active,
            deadline: self.deadline.map(Into::into),
            created_at: self.created_at.into(),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        #[cfg(feature = "no_db_triggers")]
        {
            use chrono::Utc;
            use sea_orm::ActiveValue::Set;

            if !_insert {
                self.updated_at = Set(Utc::now().into());
            }
        }

        Ok(self)
    }
}
