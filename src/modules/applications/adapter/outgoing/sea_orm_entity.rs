use sea_orm::entity::prelude::*;

use crate::applications::application::domain::{ApplicationStatus, JobApplication};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "job_applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub job_id: Uuid,

    pub candidate_id: Uuid,

    pub status: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub cover_letter: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Result<JobApplication, String> {
        let status: ApplicationStatus = self
            .status
            .parse()
            .map_err(|e| format!("application {}: {}", self.id, e))?;

        Ok(JobApplication {
            id: self.id,
            job_id: self.job_id,
            candidate_id: self.candidate_id,
            status,
            cover_letter: self.cover_letter.clone(),
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
