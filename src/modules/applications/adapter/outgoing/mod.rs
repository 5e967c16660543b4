pub mod application_repository_postgres;
pub mod sea_orm_entity;

pub use application_repository_postgres::ApplicationRepositoryPostgres;
