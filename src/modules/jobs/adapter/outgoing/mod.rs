pub mod job_repository_postgres;
pub mod sea_orm_entity;

pub use job_repository_postgres::JobRepositoryPostgres;
