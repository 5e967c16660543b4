use async_trait::async_trait;
use uuid::Uuid;

use crate::companies::application::domain::Company;
use crate::shared::listing::ListQuery;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

//
// ──────────────────────────────────────────────────────────
// Commands
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompanyCommandError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Nothing to update")]
    NoChanges,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCompanyCommand {
    pub name: String,
    pub sector: String,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub owner: Option<Uuid>,
}

impl CreateCompanyCommand {
    pub fn new(
        name: Option<String>,
        sector: Option<String>,
        address: Option<String>,
        tax_id: Option<String>,
        owner: Option<Uuid>,
    ) -> Result<Self, CompanyCommandError> {
        let name = non_blank(name).ok_or(CompanyCommandError::MissingField("name"))?;
        let sector = non_blank(sector).ok_or(CompanyCommandError::MissingField("sector"))?;

        Ok(Self {
            name,
            sector,
            address: non_blank(address),
            tax_id: non_blank(tax_id),
            owner,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCompanyCommand {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
}

impl UpdateCompanyCommand {
    /// Present-but-blank name or sector is an error; absent means unchanged.
    pub fn new(
        name: Option<String>,
        sector: Option<String>,
        address: Option<String>,
        tax_id: Option<String>,
    ) -> Result<Self, CompanyCommandError> {
        if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CompanyCommandError::MissingField("name"));
        }
        if sector.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(CompanyCommandError::MissingField("sector"));
        }
        if name.is_none() && sector.is_none() && address.is_none() && tax_id.is_none() {
            return Err(CompanyCommandError::NoChanges);
        }

        Ok(Self {
            name: non_blank(name),
            sector: non_blank(sector),
            address: address.map(|a| a.trim().to_string()),
            tax_id: tax_id.map(|t| t.trim().to_string()),
        })
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompanyError {
    #[error("Company not found")]
    NotFound,

    #[error("This account already owns a company")]
    OwnerTaken,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyUseCase: Send + Sync {
    async fn list(&self, query: ListQuery) -> Result<Vec<Company>, CompanyError>;

    async fn get(&self, id: Uuid) -> Result<Company, CompanyError>;

    /// Company owned by a company account.
    async fn get_own(&self, owner: Uuid) -> Result<Company, CompanyError>;

    async fn create(&self, command: CreateCompanyCommand) -> Result<Company, CompanyError>;

    async fn update(
        &self,
        id: Uuid,
        command: UpdateCompanyCommand,
    ) -> Result<Company, CompanyError>;

    async fn set_verified(&self, id: Uuid, verified: bool) -> Result<Company, CompanyError>;

    async fn set_premium(&self, id: Uuid, premium: bool) -> Result<Company, CompanyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_missing_field() {
        let result = CreateCompanyCommand::new(
            Some("   ".to_string()),
            Some("IT".to_string()),
            None,
            None,
            None,
        );

        assert_eq!(result, Err(CompanyCommandError::MissingField("name")));
    }

    #[test]
    fn absent_sector_is_missing_field() {
        let result = CreateCompanyCommand::new(Some("Acme".to_string()), None, None, None, None);

        assert_eq!(result, Err(CompanyCommandError::MissingField("sector")));
    }

    #[test]
    fn optional_fields_are_trimmed_or_dropped() {
        let cmd = CreateCompanyCommand::new(
            Some(" Acme ".to_string()),
            Some("IT".to_string()),
            Some("  ".to_string()),
            Some(" FR123 ".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(cmd.name, "Acme");
        assert_eq!(cmd.address, None);
        assert_eq!(cmd.tax_id.as_deref(), Some("FR123"));
    }

    #[test]
    fn update_rejects_blank_name() {
        let result = UpdateCompanyCommand::new(Some("".to_string()), None, None, None);
        assert_eq!(result, Err(CompanyCommandError::MissingField("name")));
    }
}
