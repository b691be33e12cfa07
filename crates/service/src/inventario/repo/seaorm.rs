use async_trait::async_trait;
use models::inventario::{self, Column, Entity};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};
use tracing::debug;

use crate::errors::ServiceError;
use crate::inventario::domain::{DecrementOutcome, Inventario};
use crate::inventario::repository::InventarioRepository;

pub struct SeaOrmInventarioRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmInventarioRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn active(producto_id: i64, cantidad: i32) -> inventario::ActiveModel {
    inventario::ActiveModel { producto_id: Set(producto_id), cantidad: Set(cantidad) }
}

#[async_trait]
impl InventarioRepository for SeaOrmInventarioRepository {
    async fn find(&self, producto_id: i64) -> Result<Option<Inventario>, ServiceError> {
        Ok(Entity::find_by_id(producto_id).one(&self.db).await?.map(Inventario::from))
    }

    async fn create_empty(&self, producto_id: i64) -> Result<Inventario, ServiceError> {
        let inserted = Entity::insert(active(producto_id, 0))
            .on_conflict(OnConflict::column(Column::ProductoId).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await?;
        if inserted == 0 {
            debug!(producto_id, "stock row created concurrently, re-reading");
        }
        Entity::find_by_id(producto_id)
            .one(&self.db)
            .await?
            .map(Inventario::from)
            .ok_or_else(|| ServiceError::not_found("Inventario", "productoId", producto_id))
    }

    async fn upsert_cantidad(&self, producto_id: i64, cantidad: i32) -> Result<Inventario, ServiceError> {
        let saved = Entity::insert(active(producto_id, cantidad))
            .on_conflict(OnConflict::column(Column::ProductoId).update_column(Column::Cantidad).to_owned())
            .exec_with_returning(&self.db)
            .await?;
        Ok(saved.into())
    }

    async fn decrement(&self, producto_id: i64, n: i32) -> Result<DecrementOutcome, ServiceError> {
        let txn = self.db.begin().await?;
        let updated = Entity::update_many()
            .col_expr(Column::Cantidad, Expr::col(Column::Cantidad).sub(n))
            .filter(Column::ProductoId.eq(producto_id))
            .filter(Column::Cantidad.gte(n))
            .exec_with_returning(&txn)
            .await?;
        let outcome = match updated.into_iter().next() {
            Some(row) => DecrementOutcome::Applied(row.into()),
            None => {
                let current = Entity::find_by_id(producto_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Inventario", "productoId", producto_id))?;
                DecrementOutcome::Insufficient { disponible: current.cantidad }
            }
        };
        txn.commit().await?;
        Ok(outcome)
    }

    async fn increment(&self, producto_id: i64, n: i32) -> Result<Inventario, ServiceError> {
        let updated = Entity::update_many()
            .col_expr(Column::Cantidad, Expr::col(Column::Cantidad).add(n))
            .filter(Column::ProductoId.eq(producto_id))
            .exec_with_returning(&self.db)
            .await?;
        updated
            .into_iter()
            .next()
            .map(Inventario::from)
            .ok_or_else(|| ServiceError::not_found("Inventario", "productoId", producto_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use sea_orm::ActiveModelTrait;
    use std::sync::Arc;

    async fn new_producto(db: &DatabaseConnection) -> i64 {
        models::producto::ActiveModel { nombre: Set(Some("stock test".into())), ..Default::default() }
            .insert(db)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn create_empty_is_idempotent() {
        let Some(db) = get_db().await else { return };
        let id = new_producto(&db).await;
        let repo = SeaOrmInventarioRepository::new(db);
        assert_eq!(repo.create_empty(id).await.unwrap().cantidad, 0);
        repo.upsert_cantidad(id, 4).await.unwrap();
        assert_eq!(repo.create_empty(id).await.unwrap().cantidad, 4);
    }

    #[tokio::test]
    async fn create_empty_for_unknown_producto_violates_foreign_key() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmInventarioRepository::new(db);
        let err = repo.create_empty(i64::MAX - 7).await.unwrap_err();
        assert!(matches!(err, ServiceError::ForeignKey(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn decrement_and_increment() {
        let Some(db) = get_db().await else { return };
        let id = new_producto(&db).await;
        let repo = SeaOrmInventarioRepository::new(db);
        repo.upsert_cantidad(id, 10).await.unwrap();

        assert_eq!(
            repo.decrement(id, 3).await.unwrap(),
            DecrementOutcome::Applied(Inventario { producto_id: id, cantidad: 7 })
        );
        assert_eq!(repo.decrement(id, 100).await.unwrap(), DecrementOutcome::Insufficient { disponible: 7 });
        assert_eq!(repo.increment(id, 5).await.unwrap().cantidad, 12);
        assert_eq!(repo.find(id).await.unwrap().map(|i| i.cantidad), Some(12));
    }

    #[tokio::test]
    async fn concurrent_purchases_never_oversell() {
        let Some(db) = get_db().await else { return };
        let id = new_producto(&db).await;
        let repo = Arc::new(SeaOrmInventarioRepository::new(db));
        repo.upsert_cantidad(id, 5).await.unwrap();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.decrement(id, 1).await.unwrap() })
            })
            .collect();
        let mut applied = 0;
        for h in handles {
            if matches!(h.await.unwrap(), DecrementOutcome::Applied(_)) {
                applied += 1;
            }
        }
        assert_eq!(applied, 5);
        assert_eq!(repo.find(id).await.unwrap().map(|i| i.cantidad), Some(0));
    }
}
