//! Migrator registering the catalog tables in dependency order.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_category;
mod m20240101_000002_create_product;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_category::Migration),
            // product references category, so it must come second
            Box::new(m20240101_000002_create_product::Migration),
        ]
    }
}
