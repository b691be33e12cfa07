pub mod productos;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::{api_key, types::Health};
use service::producto::ProductoService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;

pub const API_KEY_REJECTED: &str = "API Key inválida o no proporcionada";

#[derive(Clone)]
pub struct ProductoState {
    pub productos: Arc<ProductoService>,
    pub api_key: Arc<str>,
}

impl ProductoState {
    pub fn new(productos: Arc<ProductoService>, api_key: &str) -> Self {
        Self { productos, api_key: Arc::from(api_key) }
    }
}

#[utoipa::path(get, path = "/actuator/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Reject `/api/` requests whose `X-API-KEY` does not match with a plain-text 403.
pub async fn require_api_key(State(state): State<ProductoState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if api_key::requires_api_key(path) && !api_key::key_matches(req.headers(), &state.api_key) {
        warn!(%path, "api key rejected");
        return (
            StatusCode::FORBIDDEN,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            API_KEY_REJECTED,
        )
            .into_response();
    }
    next.run(req).await
}

/// Build the catalog router: health, docs, and the guarded `/api/productos` resource.
pub fn build_router(state: ProductoState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/productos", get(productos::listar).post(productos::crear))
        .route(
            "/api/productos/:id",
            get(productos::obtener).put(productos::actualizar).delete(productos::eliminar),
        );

    Router::new()
        .route("/actuator/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
