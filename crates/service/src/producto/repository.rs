use async_trait::async_trait;

use super::domain::Producto;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Persistence seam for the catalog.
#[async_trait]
pub trait ProductoRepository: Send + Sync {
    async fn insert(&self, nombre: Option<String>, precio: Option<f64>) -> Result<Producto, ServiceError>;
    async fn find(&self, id: i64) -> Result<Option<Producto>, ServiceError>;
    /// Ordered by id ascending.
    async fn list(&self, pagination: Pagination) -> Result<Page<Producto>, ServiceError>;
    async fn update(&self, producto: Producto) -> Result<Producto, ServiceError>;
    /// Returns `false` when no row had that id.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct State {
        next_id: i64,
        rows: BTreeMap<i64, Producto>,
        referenced: BTreeSet<i64>,
    }

    #[derive(Default)]
    pub struct InMemoryProductoRepository {
        state: Mutex<State>,
    }

    impl InMemoryProductoRepository {
        /// Pretend another table points at `id`, so deleting it violates a foreign key.
        pub async fn mark_referenced(&self, id: i64) {
            self.state.lock().await.referenced.insert(id);
        }
    }

    #[async_trait]
    impl ProductoRepository for InMemoryProductoRepository {
        async fn insert(&self, nombre: Option<String>, precio: Option<f64>) -> Result<Producto, ServiceError> {
            let mut st = self.state.lock().await;
            st.next_id += 1;
            let p = Producto { id: st.next_id, nombre, precio };
            st.rows.insert(p.id, p.clone());
            Ok(p)
        }

        async fn find(&self, id: i64) -> Result<Option<Producto>, ServiceError> {
            Ok(self.state.lock().await.rows.get(&id).cloned())
        }

        async fn list(&self, pagination: Pagination) -> Result<Page<Producto>, ServiceError> {
            let st = self.state.lock().await;
            Ok(Page::from_ordered(st.rows.values().cloned(), pagination))
        }

        async fn update(&self, producto: Producto) -> Result<Producto, ServiceError> {
            let mut st = self.state.lock().await;
            match st.rows.get_mut(&producto.id) {
                Some(row) => {
                    *row = producto.clone();
                    Ok(producto)
                }
                None => Err(ServiceError::not_found("Producto", "id", producto.id)),
            }
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut st = self.state.lock().await;
            if st.referenced.contains(&id) {
                return Err(ServiceError::ForeignKey(format!("inventarios references producto {id}")));
            }
            Ok(st.rows.remove(&id).is_some())
        }
    }
}
