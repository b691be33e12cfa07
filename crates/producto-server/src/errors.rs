use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::errors::ServiceError;
use tracing::error;

/// Catalog error rendered as a single JSON:API `error` resource.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub titulo: &'static str,
    pub detalle: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, titulo: &'static str, detalle: impl Into<String>) -> Self {
        Self { status, titulo, detalle: detalle.into() }
    }

    fn bad_request(detalle: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Solicitud inválida", detalle)
    }

    /// `404 NOT_FOUND`, `400 BAD_REQUEST`, ...
    pub fn codigo(&self) -> String {
        let reason = self.status.canonical_reason().unwrap_or("UNKNOWN");
        format!("{} {}", self.status.as_u16(), reason.to_uppercase().replace(' ', "_"))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Recurso no encontrado", msg),
            ServiceError::DependencyConflict(msg) => {
                Self::new(StatusCode::BAD_REQUEST, "No se puede eliminar el producto", msg)
            }
            ServiceError::InvalidArgument(msg) => Self::bad_request(msg),
            other => {
                error!(error = %other, "unhandled catalog error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor", other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "data": [{
                "type": "error",
                "id": "1",
                "attributes": {
                    "codigo": self.codigo(),
                    "titulo": self.titulo,
                    "detalle": self.detalle,
                }
            }],
            "meta": null
        });
        (self.status, Json(body)).into_response()
    }
}
