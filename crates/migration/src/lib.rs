pub use sea_orm_migration::prelude::*;

mod m20250601_create_all_tables;
mod m20250602_add_indexes;
mod m20250610_create_payments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_create_all_tables::Migration),
            Box::new(m20250602_add_indexes::Migration),
            Box::new(m20250610_create_payments::Migration),
        ]
    }
}
