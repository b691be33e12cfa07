use async_trait::async_trait;
use models::producto;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::producto::domain::Producto;
use crate::producto::mapper::{precio_to_decimal, to_domain};
use crate::producto::repository::ProductoRepository;

pub struct SeaOrmProductoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductoRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductoRepository for SeaOrmProductoRepository {
    async fn insert(&self, nombre: Option<String>, precio: Option<f64>) -> Result<Producto, ServiceError> {
        let am = producto::ActiveModel {
            nombre: Set(nombre),
            precio: Set(precio.map(precio_to_decimal).transpose()?),
            ..Default::default()
        };
        let created = am.insert(&self.db).await?;
        Ok(to_domain(created))
    }

    async fn find(&self, id: i64) -> Result<Option<Producto>, ServiceError> {
        let found = producto::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(to_domain))
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Producto>, ServiceError> {
        let (page, size) = pagination.normalize();
        let paginator = producto::Entity::find()
            .order_by_asc(producto::Column::Id)
            .paginate(&self.db, size);
        let totals = paginator.num_items_and_pages().await?;
        // fetch_page multiplies page by size unchecked
        let items = if pagination.is_past_end(totals.number_of_items) {
            Vec::new()
        } else {
            paginator.fetch_page(page).await?
        };
        Ok(Page {
            items: items.into_iter().map(to_domain).collect(),
            total_elements: totals.number_of_items,
            total_pages: totals.number_of_pages,
            number: page,
            size,
        })
    }

    async fn update(&self, p: Producto) -> Result<Producto, ServiceError> {
        let am = producto::ActiveModel {
            id: Set(p.id),
            nombre: Set(p.nombre),
            precio: Set(p.precio.map(precio_to_decimal).transpose()?),
        };
        let updated = am.update(&self.db).await?;
        Ok(to_domain(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = producto::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn crud_roundtrip_against_postgres() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmProductoRepository::new(db);

        let created = repo.insert(Some("Cuaderno".into()), Some(3.5)).await.unwrap();
        assert_eq!(created.precio, Some(3.5));

        let mut changed = created.clone();
        changed.nombre = Some("Cuaderno A4".into());
        let updated = repo.update(changed).await.unwrap();
        assert_eq!(updated.nombre.as_deref(), Some("Cuaderno A4"));
        assert_eq!(repo.find(created.id).await.unwrap(), Some(updated));

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn huge_page_number_lists_nothing() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmProductoRepository::new(db);
        repo.insert(Some("Paginado".into()), Some(1.0)).await.unwrap();

        let page = repo.list(Pagination::new(Some(u64::MAX / 2), Some(20))).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.number, u64::MAX / 2);
        assert_eq!(page.size, 20);
        assert!(page.total_elements >= 1);
    }

    #[tokio::test]
    async fn delete_with_stock_row_is_a_foreign_key_violation() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmProductoRepository::new(db.clone());
        let p = repo.insert(Some("Con stock".into()), None).await.unwrap();
        models::inventario::Entity::insert(models::inventario::ActiveModel {
            producto_id: Set(p.id),
            cantidad: Set(1),
        })
        .exec(&db)
        .await
        .unwrap();

        let err = repo.delete(p.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::ForeignKey(_)), "got {err:?}");

        models::inventario::Entity::delete_by_id(p.id).exec(&db).await.unwrap();
        assert!(repo.delete(p.id).await.unwrap());
    }
}
