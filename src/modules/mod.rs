pub mod admin;
pub mod applications;
pub mod auth;
pub mod candidates;
pub mod companies;
pub mod dashboard;
pub mod email;
pub mod jobs;
pub mod payments;
pub mod settings;
pub mod subscriptions;
pub mod users;
