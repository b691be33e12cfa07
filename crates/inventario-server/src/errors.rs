use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub status: String,
    pub title: String,
    pub detail: String,
}

/// `{"errors":[{status,title,detail}]}`
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: impl Into<String>) -> Self {
        Self { status, title, detail: detail.into() }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "No autorizado", "API Key inválida")
    }

    fn invalid(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Parámetros inválidos", detail)
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Recurso no encontrado", msg),
            ServiceError::Communication(msg) => {
                warn!(detail = %msg, "producto service unavailable");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Error de comunicación", msg)
            }
            ServiceError::InvalidArgument(msg) => Self::invalid(msg),
            ServiceError::ForeignKey(detail) => {
                warn!(%detail, "stock row refers to unknown producto");
                Self::new(StatusCode::NOT_FOUND, "Producto no encontrado", "El producto especificado no existe en el sistema")
            }
            ServiceError::DependencyConflict(msg) => {
                Self::new(StatusCode::BAD_REQUEST, "Error de integridad de datos", msg)
            }
            ServiceError::Db(msg) => {
                error!(error = %msg, "database failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor", msg)
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self { Self::invalid(r.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self { Self::invalid(r.body_text()) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let errors = vec![ErrorObject {
            status: self.status.as_u16().to_string(),
            title: self.title.to_string(),
            detail: self.detail,
        }];
        (self.status, Json(serde_json::json!({ "errors": errors }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(e: ServiceError) -> (StatusCode, &'static str) {
        let j = JsonApiError::from(e);
        (j.status, j.title)
    }

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(mapped(ServiceError::NotFound("x".into())), (StatusCode::NOT_FOUND, "Recurso no encontrado"));
        assert_eq!(
            mapped(ServiceError::Communication("x".into())),
            (StatusCode::SERVICE_UNAVAILABLE, "Error de comunicación")
        );
        assert_eq!(mapped(ServiceError::InvalidArgument("x".into())), (StatusCode::BAD_REQUEST, "Parámetros inválidos"));
        assert_eq!(mapped(ServiceError::ForeignKey("x".into())), (StatusCode::NOT_FOUND, "Producto no encontrado"));
        assert_eq!(
            mapped(ServiceError::DependencyConflict("x".into())),
            (StatusCode::BAD_REQUEST, "Error de integridad de datos")
        );
        assert_eq!(mapped(ServiceError::Db("x".into())), (StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor"));
    }

    #[test]
    fn foreign_key_detail_is_not_leaked() {
        let j = JsonApiError::from(ServiceError::ForeignKey("fk_inventario_producto".into()));
        assert_eq!(j.detail, "El producto especificado no existe en el sistema");
    }
}
