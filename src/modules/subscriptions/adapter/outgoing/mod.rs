pub mod sea_orm_entity;
pub mod subscription_repository_postgres;

pub use subscription_repository_postgres::SubscriptionRepositoryPostgres;
