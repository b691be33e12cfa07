//! Create `productos` table.
//! Catalog entries; name and price are stored exactly as submitted.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Productos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Productos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Productos::Nombre).string_len(255).null())
                    .col(ColumnDef::new(Productos::Precio).decimal_len(12, 2).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Productos::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Productos {
    Table,
    Id,
    Nombre,
    Precio,
}
