use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity as companies;
use crate::companies::application::{
    domain::Company,
    ports::outgoing::{CompanyChanges, CompanyRepository, CompanyRepositoryError, NewCompany},
};
use crate::shared::db::is_unique_violation;

#[derive(Debug, Clone)]
pub struct CompanyRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CompanyRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> CompanyRepositoryError {
    if is_unique_violation(&err) {
        CompanyRepositoryError::OwnerTaken
    } else {
        CompanyRepositoryError::DatabaseError(err.to_string())
    }
}

#[async_trait]
impl CompanyRepository for CompanyRepositoryPostgres {
    async fn list_all(&self) -> Result<Vec<Company>, CompanyRepositoryError> {
        Ok(companies::Entity::find()
            .order_by_desc(companies::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err)?
            .iter()
            .map(companies::Model::to_domain)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, CompanyRepositoryError> {
        Ok(companies::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(|m| m.to_domain()))
    }

    async fn find_by_owner(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Company>, CompanyRepositoryError> {
        Ok(companies::Entity::find()
            .filter(companies::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(db_err)?
            .map(|m| m.to_domain()))
    }

    async fn insert(&self, company: NewCompany) -> Result<Company, CompanyRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(company.user_id),
            name: Set(company.name),
            sector: Set(company.sector),
            address: Set(company.address),
            tax_id: Set(company.tax_id),
            is_verified: Set(false),
            is_premium: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(db_err)?;

        Ok(model.to_domain())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, CompanyRepositoryError> {
        let Some(existing) = companies::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(sector) = changes.sector {
            active.sector = Set(sector);
        }
        if let Some(address) = changes.address {
            active.address = Set(Some(address).filter(|a| !a.is_empty()));
        }
        if let Some(tax_id) = changes.tax_id {
            active.tax_id = Set(Some(tax_id).filter(|t| !t.is_empty()));
        }
        if let Some(verified) = changes.is_verified {
            active.is_verified = Set(verified);
        }
        if let Some(premium) = changes.is_premium {
            active.is_premium = Set(premium);
        }

        let updated = active.update(&*self.db).await.map_err(db_err)?;
        Ok(Some(updated.to_domain()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn row(name: &str) -> companies::Model {
        let now = Utc::now().fixed_offset();
        companies::Model {
            id: Uuid::new_v4(),
            user_id: None,
            name: name.to_string(),
            sector: "IT".to_string(),
            address: None,
            tax_id: None,
            is_verified: false,
            is_premium: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_returns_stored_company() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row("Acme")]])
            .into_connection();
        let repo = CompanyRepositoryPostgres::new(Arc::new(db));

        let company = repo
            .insert(NewCompany {
                user_id: None,
                name: "Acme".to_string(),
                sector: "IT".to_string(),
                address: None,
                tax_id: None,
            })
            .await
            .unwrap();

        assert_eq!(company.name, "Acme");
        assert!(!company.is_verified);
    }

    #[tokio::test]
    async fn second_company_for_owner_is_owner_taken() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(
                "duplicate key value violates unique constraint \"companies_user_id_key\""
                    .to_string(),
            )])
            .into_connection();
        let repo = CompanyRepositoryPostgres::new(Arc::new(db));

        let result = repo
            .insert(NewCompany {
                user_id: Some(Uuid::new_v4()),
                name: "Acme".to_string(),
                sector: "IT".to_string(),
                address: None,
                tax_id: None,
            })
            .await;

        assert!(matches!(result, Err(CompanyRepositoryError::OwnerTaken)));
    }

    #[tokio::test]
    async fn premium_flag_is_written() {
        let before = row("Acme");
        let mut after = before.clone();
        after.is_premium = true;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![before.clone()]])
            .append_query_results([vec![after]])
            .into_connection();
        let repo = CompanyRepositoryPostgres::new(Arc::new(db));

        let updated = repo
            .update(
                before.id,
                CompanyChanges {
                    is_premium: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(updated.is_premium);
    }
}
