use async_trait::async_trait;

use super::domain::{DecrementOutcome, Inventario};
use crate::errors::ServiceError;

/// Persistence seam for stock rows. Mutations are single atomic statements.
#[async_trait]
pub trait InventarioRepository: Send + Sync {
    async fn find(&self, producto_id: i64) -> Result<Option<Inventario>, ServiceError>;
    /// Insert a zero-stock row; if a concurrent request already created it, return that row.
    async fn create_empty(&self, producto_id: i64) -> Result<Inventario, ServiceError>;
    /// Insert or overwrite the quantity.
    async fn upsert_cantidad(&self, producto_id: i64, cantidad: i32) -> Result<Inventario, ServiceError>;
    /// `cantidad = cantidad - n` only where `cantidad >= n`.
    async fn decrement(&self, producto_id: i64, n: i32) -> Result<DecrementOutcome, ServiceError>;
    async fn increment(&self, producto_id: i64, n: i32) -> Result<Inventario, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeSet, HashMap};
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryInventarioRepository {
        rows: Mutex<HashMap<i64, i32>>,
        /// When set, only these product ids may get a stock row.
        known_productos: Option<BTreeSet<i64>>,
    }

    impl InMemoryInventarioRepository {
        pub fn with_known_productos(ids: impl IntoIterator<Item = i64>) -> Self {
            Self { rows: Mutex::default(), known_productos: Some(ids.into_iter().collect()) }
        }

        fn check_fk(&self, producto_id: i64) -> Result<(), ServiceError> {
            match &self.known_productos {
                Some(known) if !known.contains(&producto_id) => Err(ServiceError::ForeignKey(format!(
                    "Key (producto_id)=({producto_id}) is not present in table \"productos\""
                ))),
                _ => Ok(()),
            }
        }
    }

    fn row(producto_id: i64, cantidad: i32) -> Inventario { Inventario { producto_id, cantidad } }

    #[async_trait]
    impl InventarioRepository for InMemoryInventarioRepository {
        async fn find(&self, producto_id: i64) -> Result<Option<Inventario>, ServiceError> {
            Ok(self.rows.lock().await.get(&producto_id).map(|c| row(producto_id, *c)))
        }

        async fn create_empty(&self, producto_id: i64) -> Result<Inventario, ServiceError> {
            self.check_fk(producto_id)?;
            let mut rows = self.rows.lock().await;
            let cantidad = *rows.entry(producto_id).or_insert(0);
            Ok(row(producto_id, cantidad))
        }

        async fn upsert_cantidad(&self, producto_id: i64, cantidad: i32) -> Result<Inventario, ServiceError> {
            self.check_fk(producto_id)?;
            self.rows.lock().await.insert(producto_id, cantidad);
            Ok(row(producto_id, cantidad))
        }

        async fn decrement(&self, producto_id: i64, n: i32) -> Result<DecrementOutcome, ServiceError> {
            let mut rows = self.rows.lock().await;
            let Some(c) = rows.get_mut(&producto_id) else {
                return Err(ServiceError::not_found("Inventario", "productoId", producto_id));
            };
            if *c < n {
                return Ok(DecrementOutcome::Insufficient { disponible: *c });
            }
            *c -= n;
            Ok(DecrementOutcome::Applied(row(producto_id, *c)))
        }

        async fn increment(&self, producto_id: i64, n: i32) -> Result<Inventario, ServiceError> {
            let mut rows = self.rows.lock().await;
            let Some(c) = rows.get_mut(&producto_id) else {
                return Err(ServiceError::not_found("Inventario", "productoId", producto_id));
            };
            *c = c
                .checked_add(n)
                .ok_or_else(|| ServiceError::Db(format!("integer out of range for producto {producto_id}")))?;
            Ok(row(producto_id, *c))
        }
    }
}
