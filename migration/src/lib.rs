pub use sea_orm_migration::prelude::*;

mod m20260415_000001_create_clients;
mod m20260415_000002_create_ad_accounts;
mod m20260415_000003_create_campaigns;
mod m20260416_000001_create_daily_spends;
mod m20260423_000001_create_campaign_comments;
mod m20260507_000001_add_external_ref_to_campaigns;
mod m20260521_000001_create_sync_status;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260415_000001_create_clients::Migration),
            Box::new(m20260415_000002_create_ad_accounts::Migration),
            Box::new(m20260415_000003_create_campaigns::Migration),
            Box::new(m20260416_000001_create_daily_spends::Migration),
            Box::new(m20260423_000001_create_campaign_comments::Migration),
            Box::new(m20260507_000001_add_external_ref_to_campaigns::Migration),
            Box::new(m20260521_000001_create_sync_status::Migration),
        ]
    }
}
