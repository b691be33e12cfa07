//! Migrator registering entity-specific migrations in dependency order.
//! `inventarios` references `productos`, so the catalog table comes first.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_productos;
mod m20240601_000002_create_inventarios;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_productos::Migration),
            Box::new(m20240601_000002_create_inventarios::Migration),
        ]
    }
}
