use async_trait::async_trait;
use uuid::Uuid;

use crate::companies::application::{
    domain::Company,
    ports::{
        incoming::{CompanyError, CompanyUseCase, CreateCompanyCommand, UpdateCompanyCommand},
        outgoing::{CompanyChanges, CompanyRepository, CompanyRepositoryError, NewCompany},
    },
};
use crate::shared::listing::ListQuery;

impl From<CompanyRepositoryError> for CompanyError {
    fn from(err: CompanyRepositoryError) -> Self {
        match err {
            CompanyRepositoryError::OwnerTaken => CompanyError::OwnerTaken,
            CompanyRepositoryError::DatabaseError(msg) => CompanyError::Internal(msg),
        }
    }
}

pub struct CompanyService<R>
where
    R: CompanyRepository,
{
    repository: R,
}

impl<R> CompanyService<R>
where
    R: CompanyRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    async fn apply(&self, id: Uuid, changes: CompanyChanges) -> Result<Company, CompanyError> {
        self.repository
            .update(id, changes)
            .await?
            .ok_or(CompanyError::NotFound)
    }
}

#[async_trait]
impl<R> CompanyUseCase for CompanyService<R>
where
    R: CompanyRepository,
{
    async fn list(&self, query: ListQuery) -> Result<Vec<Company>, CompanyError> {
        Ok(query.apply(self.repository.list_all().await?))
    }

    async fn get(&self, id: Uuid) -> Result<Company, CompanyError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CompanyError::NotFound)
    }

    async fn get_own(&self, owner: Uuid) -> Result<Company, CompanyError> {
        self.repository
            .find_by_owner(owner)
            .await?
            .ok_or(CompanyError::NotFound)
    }

    async fn create(&self, command: CreateCompanyCommand) -> Result<Company, CompanyError> {
        let company = self
            .repository
            .insert(NewCompany {
                user_id: command.owner,
                name: command.name,
                sector: command.sector,
                address: command.address,
                tax_id: command.tax_id,
            })
            .await?;
        Ok(company)
    }

    async fn update(
        &self,
        id: Uuid,
        command: UpdateCompanyCommand,
    ) -> Result<Company, CompanyError> {
        self.apply(
            id,
            CompanyChanges {
                name: command.name,
                sector: command.sector,
                address: command.address,
                tax_id: command.tax_id,
                ..Default::default()
            },
        )
        .await
    }

    async fn set_verified(&self, id: Uuid, verified: bool) -> Result<Company, CompanyError> {
        self.apply(
            id,
            CompanyChanges {
                is_verified: Some(verified),
                ..Default::default()
            },
        )
        .await
    }

    async fn set_premium(&self, id: Uuid, premium: bool) -> Result<Company, CompanyError> {
        self.apply(
            id,
            CompanyChanges {
                is_premium: Some(premium),
                ..Default::default()
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::application::ports::outgoing::MockCompanyRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn company(name: &str, sector: &str, verified: bool) -> Company {
        Company {
            id: Uuid::new_v4(),
            user_id: None,
            name: name.to_string(),
            sector: sector.to_string(),
            address: None,
            tax_id: None,
            is_verified: verified,
            is_premium: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_inserts_command_values_once() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_insert()
            .with(eq(NewCompany {
                user_id: None,
                name: "Acme".to_string(),
                sector: "IT".to_string(),
                address: None,
                tax_id: None,
            }))
            .times(1)
            .returning(|c| Ok(company(&c.name, &c.sector, false)));
        let service = CompanyService::new(repo);

        let command =
            CreateCompanyCommand::new(Some("Acme".into()), Some("IT".into()), None, None, None)
                .unwrap();
        let created = service.create(command).await.unwrap();

        assert_eq!(created.name, "Acme");
    }

    #[tokio::test]
    async fn list_filters_on_verification_status() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_list_all().returning(|| {
            Ok(vec![
                company("Acme", "IT", true),
                company("Globex", "Energy", false),
                company("Initech", "IT", true),
            ])
        });
        let service = CompanyService::new(repo);

        let verified = service.list(ListQuery::with_status("verified")).await.unwrap();
        let it = service.list(ListQuery::with_search("it")).await.unwrap();

        assert_eq!(verified.len(), 2);
        assert_eq!(it.len(), 2);
    }

    #[tokio::test]
    async fn verifying_missing_company_is_not_found() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_update()
            .withf(|_, changes| changes.is_verified == Some(true))
            .returning(|_, _| Ok(None));
        let service = CompanyService::new(repo);

        let result = service.set_verified(Uuid::new_v4(), true).await;

        assert!(matches!(result, Err(CompanyError::NotFound)));
    }
}
