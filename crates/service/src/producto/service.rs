use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{Producto, ProductoInput};
use super::repository::ProductoRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Catalog business service independent of web framework
pub struct ProductoService {
    repo: Arc<dyn ProductoRepository>,
}

impl ProductoService {
    pub fn new(repo: Arc<dyn ProductoRepository>) -> Self { Self { repo } }

    /// Store a new product exactly as given.
    ///
    /// # Examples
    /// ```
    /// use service::producto::{ProductoService, domain::ProductoInput, repository::mock::InMemoryProductoRepository};
    /// use std::sync::Arc;
    /// let svc = ProductoService::new(Arc::new(InMemoryProductoRepository::default()));
    /// let p = tokio_test::block_on(svc.crear(ProductoInput { nombre: Some("Widget".into()), precio: Some(9.99) })).unwrap();
    /// assert_eq!(p.id, 1);
    /// assert_eq!(p.nombre.as_deref(), Some("Widget"));
    /// ```
    #[instrument(skip(self, input))]
    pub async fn crear(&self, input: ProductoInput) -> Result<Producto, ServiceError> {
        let p = self.repo.insert(input.nombre, input.precio).await?;
        info!(producto_id = p.id, "producto_created");
        Ok(p)
    }

    #[instrument(skip(self))]
    pub async fn obtener(&self, id: i64) -> Result<Producto, ServiceError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Producto", "id", id))
    }

    #[instrument(skip(self))]
    pub async fn listar(&self, pagination: Pagination) -> Result<Page<Producto>, ServiceError> {
        self.repo.list(pagination).await
    }

    /// Overwrites `nombre`; `precio` only when the input carries one.
    #[instrument(skip(self, input))]
    pub async fn actualizar(&self, id: i64, input: ProductoInput) -> Result<Producto, ServiceError> {
        let mut p = self.obtener(id).await?;
        p.nombre = input.nombre;
        if let Some(precio) = input.precio {
            p.precio = Some(precio);
        }
        let p = self.repo.update(p).await?;
        info!(producto_id = p.id, "producto_updated");
        Ok(p)
    }

    #[instrument(skip(self))]
    pub async fn eliminar(&self, id: i64) -> Result<(), ServiceError> {
        self.obtener(id).await?;
        match self.repo.delete(id).await {
            Ok(true) => {
                info!(producto_id = id, "producto_deleted");
                Ok(())
            }
            Ok(false) => Err(ServiceError::not_found("Producto", "id", id)),
            Err(ServiceError::ForeignKey(detail)) => {
                warn!(producto_id = id, %detail, "producto still referenced by inventario");
                Err(ServiceError::DependencyConflict(format!(
                    "No se puede eliminar el producto con ID {id} porque tiene registros asociados en inventario. \
                     Elimine primero los registros de inventario."
                )))
            }
            Err(e) => Err(e),
        }
    }
}
