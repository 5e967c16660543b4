pub mod company_repository_postgres;
pub mod sea_orm_entity;

pub use company_repository_postgres::CompanyRepositoryPostgres;
