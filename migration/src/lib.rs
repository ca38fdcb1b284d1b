pub use sea_orm_migration::prelude::*;

mod util;
mod m20250802_091500_init;
mod m20250803_120000_generate_users;
mod m20250805_104500_crm_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250802_091500_init::Migration),
            Box::new(m20250803_120000_generate_users::Migration),
            Box::new(m20250805_104500_crm_tables::Migration),
        ]
    }
}
