//! Outbound client the stock ledger uses to look products up in the catalog.

use async_trait::async_trait;
use common::api_key::API_KEY_HEADER;
use configs::ProductoServiceConfig;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::errors::ServiceError;
use crate::inventario::domain::ProductoResumen;

pub const NOMBRE_POR_DEFECTO: &str = "Producto sin nombre";

#[async_trait]
pub trait ProductoClient: Send + Sync {
    /// `NotFound` when the catalog has no such product, `Communication` when it could not be asked.
    async fn obtener_producto(&self, id: i64) -> Result<ProductoResumen, ServiceError>;
}

pub struct HttpProductoClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpProductoClient {
    pub fn new(cfg: &ProductoServiceConfig, api_key: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.read_timeout())
            .build()?;
        Ok(Self { http, base_url: cfg.url.trim_end_matches('/').to_string(), api_key: api_key.into() })
    }
}

fn conexion(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Communication(format!("Error de conexión con el servicio de productos: {e}"))
}

#[async_trait]
impl ProductoClient for HttpProductoClient {
    #[instrument(skip(self))]
    async fn obtener_producto(&self, id: i64) -> Result<ProductoResumen, ServiceError> {
        let url = format!("{}/api/productos/{}", self.base_url, id);
        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, %url, "producto service unreachable");
                conexion(e)
            })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ServiceError::not_found("Producto", "id", id));
        }
        if status.is_server_error() {
            warn!(%status, producto_id = id, "producto service failed");
            return Err(ServiceError::Communication(format!("Error en el servidor de productos: {status}")));
        }
        if !status.is_success() {
            warn!(%status, producto_id = id, "producto service rejected request");
            return Err(ServiceError::Communication(format!(
                "Error en la petición al servicio de productos: {status}"
            )));
        }

        let body = resp.text().await.map_err(conexion)?;
        debug!(producto_id = id, bytes = body.len(), "producto response received");
        parse_producto(id, &body)
    }
}

/// Extract the product `id` from a catalog JSON:API document.
pub fn parse_producto(id: i64, body: &str) -> Result<ProductoResumen, ServiceError> {
    let not_found = || ServiceError::not_found("Producto", "id", id);
    if body.trim().is_empty() {
        return Err(not_found());
    }
    let doc: Value = serde_json::from_str(body).map_err(|_| not_found())?;
    let node = match doc.get("data") {
        Some(Value::Array(items)) => items.iter().find(|n| id_matches(n, id)),
        Some(obj @ Value::Object(_)) => Some(obj).filter(|n| id_matches(n, id)),
        _ => None,
    }
    .ok_or_else(not_found)?;
    let attrs = node.get("attributes").filter(|a| a.is_object()).ok_or_else(not_found)?;

    let nombre = attrs
        .get("nombre")
        .and_then(Value::as_str)
        .unwrap_or(NOMBRE_POR_DEFECTO)
        .to_string();
    let precio = match attrs.get("precio") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(ProductoResumen { id, nombre, precio })
}

fn id_matches(node: &Value, id: i64) -> bool {
    match node.get("id") {
        Some(Value::String(s)) => s.trim() == id.to_string(),
        Some(Value::Number(n)) => n.as_i64() == Some(id),
        _ => false,
    }
}

/// Scripted client for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Clone, Debug)]
    pub enum Behavior {
        Found(ProductoResumen),
        NotFound,
        Unavailable,
    }

    /// Unknown ids answer `NotFound` unless a default behavior is set.
    #[derive(Default)]
    pub struct MockProductoClient {
        behaviors: Mutex<HashMap<i64, Behavior>>,
        fallback: Option<Behavior>,
        calls: AtomicUsize,
    }

    impl MockProductoClient {
        /// Every id answers with the same behavior unless overridden.
        pub fn always(fallback: Behavior) -> Self {
            Self { fallback: Some(fallback), ..Self::default() }
        }

        pub async fn set(&self, id: i64, behavior: Behavior) {
            self.behaviors.lock().await.insert(id, behavior);
        }

        pub async fn with_producto(self, id: i64, nombre: &str, precio: f64) -> Self {
            self.set(id, Behavior::Found(ProductoResumen { id, nombre: nombre.into(), precio })).await;
            self
        }

        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
    }

    #[async_trait]
    impl ProductoClient for MockProductoClient {
        async fn obtener_producto(&self, id: i64) -> Result<ProductoResumen, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let behavior = self.behaviors.lock().await.get(&id).cloned().or_else(|| self.fallback.clone());
            match behavior {
                Some(Behavior::Found(p)) => Ok(ProductoResumen { id, ..p }),
                Some(Behavior::Unavailable) => Err(ServiceError::Communication(
                    "Error de conexión con el servicio de productos: connection refused".into(),
                )),
                Some(Behavior::NotFound) | None => Err(ServiceError::not_found("Producto", "id", id)),
            }
        }
    }
}
