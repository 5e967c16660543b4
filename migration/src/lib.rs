pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_profiles_table;
mod m20250301_000002_create_companies_and_candidates;
mod m20250302_000001_create_jobs_and_applications;
mod m20250303_000001_create_billing_tables;
mod m20250304_000001_create_admin_tables;
mod m20250305_000001_create_site_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_profiles_table::Migration),
            Box::new(m20250301_000002_create_companies_and_candidates::Migration),
            Box::new(m20250302_000001_create_jobs_and_applications::Migration),
            Box::new(m20250303_000001_create_billing_tables::Migration),
            Box::new(m20250304_000001_create_admin_tables::Migration),
            Box::new(m20250305_000001_create_site_settings::Migration),
        ]
    }
}
