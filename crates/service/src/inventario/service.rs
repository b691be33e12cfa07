use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{DecrementOutcome, Inventario, InventarioDetalle};
use super::events::{InventarioEvent, InventarioEventPublisher, TipoOperacion};
use super::repository::InventarioRepository;
use crate::errors::ServiceError;
use crate::producto_client::ProductoClient;

/// Stock ledger business service independent of web framework
pub struct InventarioService {
    repo: Arc<dyn InventarioRepository>,
    productos: Arc<dyn ProductoClient>,
    events: Arc<dyn InventarioEventPublisher>,
}

impl InventarioService {
    pub fn new(
        repo: Arc<dyn InventarioRepository>,
        productos: Arc<dyn ProductoClient>,
        events: Arc<dyn InventarioEventPublisher>,
    ) -> Self {
        Self { repo, productos, events }
    }

    /// Stock for a product together with its catalog data. A missing row is created with zero stock.
    ///
    /// # Examples
    /// ```
    /// use service::inventario::{InventarioService, repository::mock::InMemoryInventarioRepository};
    /// use service::inventario::events::mock::RecordingEventPublisher;
    /// use service::producto_client::mock::MockProductoClient;
    /// use std::sync::Arc;
    /// let productos = tokio_test::block_on(MockProductoClient::default().with_producto(1, "Widget", 9.99));
    /// let svc = InventarioService::new(
    ///     Arc::new(InMemoryInventarioRepository::default()),
    ///     Arc::new(productos),
    ///     Arc::new(RecordingEventPublisher::default()),
    /// );
    /// let detalle = tokio_test::block_on(svc.obtener_por_producto(1)).unwrap();
    /// assert_eq!(detalle.inventario.cantidad, 0);
    /// assert_eq!(detalle.producto.nombre, "Widget");
    /// ```
    #[instrument(skip(self))]
    pub async fn obtener_por_producto(&self, producto_id: i64) -> Result<InventarioDetalle, ServiceError> {
        let inventario = match self.repo.find(producto_id).await? {
            Some(i) => i,
            None => {
                let created = self.repo.create_empty(producto_id).await?;
                info!(producto_id, "inventario_created");
                created
            }
        };
        let producto = self.productos.obtener_producto(producto_id).await?;
        Ok(InventarioDetalle { inventario, producto })
    }

    #[instrument(skip(self))]
    pub async fn actualizar_cantidad(&self, producto_id: i64, cantidad: i32) -> Result<Inventario, ServiceError> {
        if cantidad < 0 {
            return Err(ServiceError::InvalidArgument("La cantidad no puede ser negativa".into()));
        }
        if self.repo.find(producto_id).await?.is_none() {
            self.verify_producto(producto_id).await?;
        }
        let saved = self.repo.upsert_cantidad(producto_id, cantidad).await?;
        self.publish(TipoOperacion::Actualizacion, &saved).await;
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn registrar_compra(&self, producto_id: i64, cantidad: i32) -> Result<Inventario, ServiceError> {
        if cantidad <= 0 {
            return Err(ServiceError::InvalidArgument("La cantidad comprada debe ser mayor a cero".into()));
        }
        self.ensure_row(producto_id).await?;
        match self.repo.decrement(producto_id, cantidad).await? {
            DecrementOutcome::Applied(saved) => {
                self.publish(TipoOperacion::Compra, &saved).await;
                Ok(saved)
            }
            DecrementOutcome::Insufficient { disponible } => {
                warn!(producto_id, disponible, solicitada = cantidad, "insufficient stock");
                Err(ServiceError::InvalidArgument(format!(
                    "Stock insuficiente. Stock actual: {disponible}, Cantidad solicitada: {cantidad}"
                )))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn registrar_reposicion(&self, producto_id: i64, cantidad: i32) -> Result<Inventario, ServiceError> {
        if cantidad <= 0 {
            return Err(ServiceError::InvalidArgument("La cantidad repuesta debe ser mayor a cero".into()));
        }
        self.ensure_row(producto_id).await?;
        let saved = self.repo.increment(producto_id, cantidad).await?;
        self.publish(TipoOperacion::Reposicion, &saved).await;
        Ok(saved)
    }

    async fn ensure_row(&self, producto_id: i64) -> Result<Inventario, ServiceError> {
        if let Some(existing) = self.repo.find(producto_id).await? {
            return Ok(existing);
        }
        self.verify_producto(producto_id).await?;
        let created = self.repo.create_empty(producto_id).await?;
        info!(producto_id, "inventario_created");
        Ok(created)
    }

    /// Unreachable catalog is tolerated; an unknown product is not.
    async fn verify_producto(&self, producto_id: i64) -> Result<(), ServiceError> {
        match self.productos.obtener_producto(producto_id).await {
            Ok(_) => Ok(()),
            Err(ServiceError::Communication(detail)) => {
                warn!(producto_id, %detail, "could not verify producto, continuing");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn publish(&self, tipo: TipoOperacion, inventario: &Inventario) {
        let event = InventarioEvent::now(tipo, inventario.producto_id, inventario.cantidad);
        self.events.publish(&event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventario::events::mock::RecordingEventPublisher;
    use crate::inventario::repository::mock::InMemoryInventarioRepository;
    use crate::producto_client::mock::{Behavior, MockProductoClient};

    struct Harness {
        repo: Arc<InMemoryInventarioRepository>,
        productos: Arc<MockProductoClient>,
        events: Arc<RecordingEventPublisher>,
        svc: InventarioService,
    }

    fn harness_with(repo: InMemoryInventarioRepository, productos: MockProductoClient) -> Harness {
        let repo = Arc::new(repo);
        let productos = Arc::new(productos);
        let events = Arc::new(RecordingEventPublisher::default());
        let svc = InventarioService::new(repo.clone(), productos.clone(), events.clone());
        Harness { repo, productos, events, svc }
    }

    async fn widget() -> Harness {
        let productos = MockProductoClient::default().with_producto(1, "Widget", 9.99).await;
        harness_with(InMemoryInventarioRepository::default(), productos)
    }

    async fn tipos(h: &Harness) -> Vec<TipoOperacion> {
        h.events.events().await.into_iter().map(|e| e.tipo).collect()
    }

    #[tokio::test]
    async fn read_creates_zero_row_and_enriches() {
        let h = widget().await;
        let d = h.svc.obtener_por_producto(1).await.unwrap();
        assert_eq!(d.inventario, Inventario { producto_id: 1, cantidad: 0 });
        assert_eq!(d.producto.nombre, "Widget");
        assert_eq!(d.producto.precio, 9.99);
        assert_eq!(h.repo.find(1).await.unwrap().map(|i| i.cantidad), Some(0));
        assert!(tipos(&h).await.is_empty());
    }

    #[tokio::test]
    async fn read_propagates_client_failures() {
        let h = harness_with(InMemoryInventarioRepository::default(), MockProductoClient::always(Behavior::Unavailable));
        assert!(matches!(h.svc.obtener_por_producto(3).await, Err(ServiceError::Communication(_))));

        let h = harness_with(InMemoryInventarioRepository::default(), MockProductoClient::default());
        assert!(matches!(h.svc.obtener_por_producto(3).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn actualizar_rejects_negative_without_side_effects() {
        let h = widget().await;
        let err = h.svc.actualizar_cantidad(1, -1).await.unwrap_err();
        assert_eq!(err.to_string(), "La cantidad no puede ser negativa");
        assert_eq!(h.repo.find(1).await.unwrap(), None);
        assert_eq!(h.productos.calls(), 0);
        assert!(tipos(&h).await.is_empty());
    }

    #[tokio::test]
    async fn actualizar_sets_exact_quantity_and_publishes() {
        let h = widget().await;
        let saved = h.svc.actualizar_cantidad(1, 25).await.unwrap();
        assert_eq!(saved.cantidad, 25);
        let saved = h.svc.actualizar_cantidad(1, 0).await.unwrap();
        assert_eq!(saved.cantidad, 0);
        assert_eq!(tipos(&h).await, vec![TipoOperacion::Actualizacion, TipoOperacion::Actualizacion]);
        // existing row skips verification
        assert_eq!(h.productos.calls(), 1);
    }

    #[tokio::test]
    async fn actualizar_unknown_producto_is_not_found() {
        let h = harness_with(InMemoryInventarioRepository::default(), MockProductoClient::default());
        assert!(matches!(h.svc.actualizar_cantidad(8, 3).await, Err(ServiceError::NotFound(_))));
        assert_eq!(h.repo.find(8).await.unwrap(), None);
    }

    #[tokio::test]
    async fn actualizar_tolerates_unreachable_catalog() {
        let h = harness_with(InMemoryInventarioRepository::default(), MockProductoClient::always(Behavior::Unavailable));
        assert_eq!(h.svc.actualizar_cantidad(8, 3).await.unwrap().cantidad, 3);
    }

    #[tokio::test]
    async fn unreachable_catalog_then_missing_parent_is_foreign_key() {
        let h = harness_with(
            InMemoryInventarioRepository::with_known_productos([1]),
            MockProductoClient::always(Behavior::Unavailable),
        );
        assert!(matches!(h.svc.registrar_reposicion(99, 1).await, Err(ServiceError::ForeignKey(_))));
    }

    #[tokio::test]
    async fn compra_validates_quantity() {
        let h = widget().await;
        for n in [0, -5] {
            let err = h.svc.registrar_compra(1, n).await.unwrap_err();
            assert_eq!(err.to_string(), "La cantidad comprada debe ser mayor a cero");
        }
        assert_eq!(h.repo.find(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reposicion_validates_quantity() {
        let h = widget().await;
        let err = h.svc.registrar_reposicion(1, 0).await.unwrap_err();
        assert_eq!(err.to_string(), "La cantidad repuesta debe ser mayor a cero");
    }

    #[tokio::test]
    async fn purchase_on_fresh_product_reports_zero_stock() {
        let h = widget().await;
        let err = h.svc.registrar_compra(1, 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Stock insuficiente. Stock actual: 0, Cantidad solicitada: 1");
        assert_eq!(h.repo.find(1).await.unwrap().map(|i| i.cantidad), Some(0));
    }

    #[tokio::test]
    async fn widget_restock_and_purchases() {
        let h = widget().await;
        assert_eq!(h.svc.registrar_reposicion(1, 10).await.unwrap().cantidad, 10);
        assert_eq!(h.svc.registrar_compra(1, 3).await.unwrap().cantidad, 7);

        let err = h.svc.registrar_compra(1, 100).await.unwrap_err();
        assert_eq!(err.to_string(), "Stock insuficiente. Stock actual: 7, Cantidad solicitada: 100");

        let d = h.svc.obtener_por_producto(1).await.unwrap();
        assert_eq!(d.inventario.cantidad, 7);
        assert_eq!(tipos(&h).await, vec![TipoOperacion::Reposicion, TipoOperacion::Compra]);

        let events = h.events.events().await;
        assert_eq!(events[1].cantidad, 7);
        assert_eq!(events[1].producto_id, 1);
    }

    #[tokio::test]
    async fn concurrent_purchases_drain_exactly_the_stock() {
        let h = widget().await;
        h.svc.actualizar_cantidad(1, 5).await.unwrap();
        let svc = Arc::new(h.svc);
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move { svc.registrar_compra(1, 1).await })
            })
            .collect();
        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 5);
        assert_eq!(h.repo.find(1).await.unwrap().map(|i| i.cantidad), Some(0));
    }
}
