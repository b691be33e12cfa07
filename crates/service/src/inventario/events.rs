use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TipoOperacion {
    Actualizacion,
    Compra,
    Reposicion,
}

impl TipoOperacion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Actualizacion => "ACTUALIZACIÓN",
            Self::Compra => "COMPRA",
            Self::Reposicion => "REPOSICIÓN",
        }
    }
}

impl fmt::Display for TipoOperacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Emitted after every successful stock mutation. `cantidad` is the stock left afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct InventarioEvent {
    pub tipo: TipoOperacion,
    pub producto_id: i64,
    pub cantidad: i32,
    pub ocurrido_en: DateTime<Utc>,
}

impl InventarioEvent {
    pub fn now(tipo: TipoOperacion, producto_id: i64, cantidad: i32) -> Self {
        Self { tipo, producto_id, cantidad, ocurrido_en: Utc::now() }
    }
}

#[async_trait]
pub trait InventarioEventPublisher: Send + Sync {
    async fn publish(&self, event: &InventarioEvent);
}

/// Writes every event as a structured log record.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingEventPublisher;

#[async_trait]
impl InventarioEventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: &InventarioEvent) {
        info!(
            tipo = %event.tipo,
            producto_id = event.producto_id,
            cantidad = event.cantidad,
            ocurrido_en = %event.ocurrido_en.to_rfc3339(),
            "EVENTO DE INVENTARIO"
        );
    }
}

pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    /// Keeps published events in memory for assertions.
    #[derive(Default)]
    pub struct RecordingEventPublisher {
        events: Mutex<Vec<InventarioEvent>>,
    }

    impl RecordingEventPublisher {
        pub async fn events(&self) -> Vec<InventarioEvent> { self.events.lock().await.clone() }
    }

    #[async_trait]
    impl InventarioEventPublisher for RecordingEventPublisher {
        async fn publish(&self, event: &InventarioEvent) {
            self.events.lock().await.push(event.clone());
        }
    }
}
