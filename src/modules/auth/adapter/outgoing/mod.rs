pub mod account_repository_postgres;
pub mod argon2_hasher;
pub mod jwt;
pub mod token_blacklist_redis;

pub use account_repository_postgres::AccountRepositoryPostgres;
pub use argon2_hasher::Argon2Hasher;
pub use token_blacklist_redis::RedisTokenBlacklist;
