//! Create `inventarios` table.
//! One stock row per product; deleting a product with stock is refused by the FK.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inventarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inventarios::ProductoId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Inventarios::Cantidad)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Inventarios::Cantidad).gte(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventario_producto")
                            .from(Inventarios::Table, Inventarios::ProductoId)
                            .to(Productos::Table, Productos::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Inventarios::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Inventarios {
    Table,
    ProductoId,
    Cantidad,
}

#[derive(DeriveIden)]
enum Productos { Table, Id }
