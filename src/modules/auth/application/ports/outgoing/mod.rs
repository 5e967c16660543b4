pub mod account_repository;
pub mod account_status;
pub mod password_hasher;
pub mod token_blacklist;
pub mod token_provider;

pub use account_repository::{AccountRepository, AccountRepositoryError, NewAccount};
pub use account_status::AccountStatusLookup;
pub use password_hasher::{HashError, PasswordHasher};
pub use token_blacklist::{TokenBlacklist, TokenBlacklistError};
pub use token_provider::{TokenClaims, TokenError, TokenProvider};
