use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionError, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::{
    domain::entities::{Account, AccountCredentials, UserType},
    ports::outgoing::{AccountRepository, AccountRepositoryError, AccountStatusLookup, NewAccount},
};
use crate::candidates::adapter::outgoing::sea_orm_entity as candidates;
use crate::companies::adapter::outgoing::sea_orm_entity as companies;
use crate::shared::db::is_unique_violation;
use crate::users::adapter::outgoing::sea_orm_entity as profiles;

#[derive(Debug, Clone)]
pub struct AccountRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> AccountRepositoryError {
    if is_unique_violation(&err) {
        AccountRepositoryError::EmailTaken
    } else {
        AccountRepositoryError::DatabaseError(err.to_string())
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryPostgres {
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let created = self
            .db
            .transaction::<_, profiles::Model, DbErr>(|txn| {
                Box::pin(async move {
                    let now = Utc::now().fixed_offset();
                    let profile_id = Uuid::new_v4();

                    let profile = profiles::ActiveModel {
                        id: Set(profile_id),
                        email: Set(account.email),
                        name: Set(account.name.clone()),
                        user_type: Set(account.user_type.as_str().to_string()),
                        password_hash: Set(account.password_hash),
                        is_active: Set(true),
                        email_verified: Set(false),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    match account.user_type {
                        UserType::Company => {
                            companies::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                user_id: Set(Some(profile_id)),
                                name: Set(account.company_name.unwrap_or(account.name)),
                                sector: Set(account.sector.unwrap_or_else(|| "other".to_string())),
                                address: Set(None),
                                tax_id: Set(None),
                                is_verified: Set(false),
                                is_premium: Set(false),
                                created_at: Set(now),
                                updated_at: Set(now),
                            }
                            .insert(txn)
                            .await?;
                        }
                        UserType::Candidate | UserType::Student => {
                            candidates::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                user_id: Set(profile_id),
                                name: Set(account.name),
                                phone: Set(account.phone),
                                description: Set(None),
                                cv_url: Set(None),
                                created_at: Set(now),
                                updated_at: Set(now),
                            }
                            .insert(txn)
                            .await?;
                        }
                        UserType::Admin => {}
                    }

                    Ok(profile)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(err) | TransactionError::Transaction(err) => {
                    map_db_err(err)
                }
            })?;

        created
            .to_account()
            .map_err(AccountRepositoryError::CorruptRecord)
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, AccountRepositoryError> {
        let found = profiles::Entity::find()
            .filter(profiles::Column::Email.eq(email.to_lowercase()))
            .one(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?;

        match found {
            Some(model) => {
                let account = model
                    .to_account()
                    .map_err(AccountRepositoryError::CorruptRecord)?;
                Ok(Some(AccountCredentials {
                    account,
                    password_hash: model.password_hash,
                }))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountRepositoryError> {
        profiles::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?
            .map(|model| model.to_account().map_err(AccountRepositoryError::CorruptRecord))
            .transpose()
    }
}

#[async_trait]
impl AccountStatusLookup for AccountRepositoryPostgres {
    async fn is_active(&self, user_id: Uuid) -> Result<bool, AccountRepositoryError> {
        let found = profiles::Entity::find_by_id(user_id)
            .filter(profiles::Column::IsActive.eq(true))
            .one(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?;

        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn profile_model(id: Uuid, user_type: &str) -> profiles::Model {
        let now = Utc::now().fixed_offset();
        profiles::Model {
            id,
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            user_type: user_type.to_string(),
            password_hash: "$argon2id$hash".to_string(),
            is_active: true,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn candidate_model(user_id: Uuid) -> candidates::Model {
        let now = Utc::now().fixed_offset();
        candidates::Model {
            id: Uuid::new_v4(),
            user_id,
            name: "Jane".to_string(),
            phone: None,
            description: None,
            cv_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_candidate() -> NewAccount {
        NewAccount {
            email: "jane@example.com".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            name: "Jane".to_string(),
            user_type: UserType::Candidate,
            company_name: None,
            sector: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn create_account_inserts_profile_and_candidate_row() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![profile_model(id, "candidate")]])
            .append_query_results([vec![candidate_model(id)]])
            .into_connection();
        let repo = AccountRepositoryPostgres::new(Arc::new(db));

        let account = repo.create_account(new_candidate()).await.unwrap();

        assert_eq!(account.id, id);
        assert_eq!(account.user_type, UserType::Candidate);
    }

    #[tokio::test]
    async fn duplicate_email_is_email_taken() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(
                "duplicate key value violates unique constraint \"profiles_email_key\"".to_string(),
            )])
            .into_connection();
        let repo = AccountRepositoryPostgres::new(Arc::new(db));

        let result = repo.create_account(new_candidate()).await;

        assert!(matches!(result, Err(AccountRepositoryError::EmailTaken)));
    }

    #[tokio::test]
    async fn find_credentials_returns_hash() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![profile_model(id, "company")]])
            .into_connection();
        let repo = AccountRepositoryPostgres::new(Arc::new(db));

        let creds = repo.find_credentials("Jane@Example.com").await.unwrap().unwrap();

        assert_eq!(creds.account.id, id);
        assert_eq!(creds.account.user_type, UserType::Company);
        assert_eq!(creds.password_hash, "$argon2id$hash");
    }

    #[tokio::test]
    async fn unknown_user_type_is_corrupt_record() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![profile_model(Uuid::new_v4(), "recruiter")]])
            .into_connection();
        let repo = AccountRepositoryPostgres::new(Arc::new(db));

        let result = repo.find_by_id(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AccountRepositoryError::CorruptRecord(_))));
    }

    #[tokio::test]
    async fn active_profile_passes_status_lookup() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![profile_model(id, "candidate")]])
            .into_connection();
        let repo = AccountRepositoryPostgres::new(Arc::new(db));

        assert!(repo.is_active(id).await.unwrap());
    }

    #[tokio::test]
    async fn deactivated_profile_fails_status_lookup() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<profiles::Model>::new()])
            .into_connection();
        let repo = AccountRepositoryPostgres::new(Arc::new(db));

        assert!(!repo.is_active(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn missing_profile_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<profiles::Model>::new()])
            .into_connection();
        let repo = AccountRepositoryPostgres::new(Arc::new(db));

        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }
}
