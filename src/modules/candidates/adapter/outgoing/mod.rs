pub mod candidate_repository_postgres;
pub mod sea_orm_entity;

pub use candidate_repository_postgres::CandidateRepositoryPostgres;
