pub mod admin_directory_postgres;
pub mod admin_log_repository_postgres;
pub mod admin_role_repository_postgres;
pub mod sea_orm_entity;

pub use admin_directory_postgres::AdminDirectoryPostgres;
pub use admin_log_repository_postgres::AdminLogRepositoryPostgres;
pub use admin_role_repository_postgres::AdminRoleRepositoryPostgres;
