pub mod inventarios;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use common::{api_key, types::Health};
use service::inventario::InventarioService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

#[derive(Clone)]
pub struct InventarioState {
    pub inventarios: Arc<InventarioService>,
    pub api_key: Arc<str>,
}

impl InventarioState {
    pub fn new(inventarios: Arc<InventarioService>, api_key: &str) -> Self {
        Self { inventarios, api_key: Arc::from(api_key) }
    }
}

#[utoipa::path(get, path = "/actuator/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Reject `/api/` requests whose `X-API-KEY` does not match with a JSON:API 401.
pub async fn require_api_key(State(state): State<InventarioState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if api_key::requires_api_key(path) && !api_key::key_matches(req.headers(), &state.api_key) {
        warn!(%path, "api key rejected");
        return JsonApiError::unauthorized().into_response();
    }
    next.run(req).await
}

/// Build the stock ledger router: health, docs, and the guarded `/api/inventarios` resource.
pub fn build_router(state: InventarioState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(
            "/api/inventarios/:producto_id",
            get(inventarios::obtener).patch(inventarios::actualizar_cantidad),
        )
        .route("/api/inventarios/:producto_id/compras", post(inventarios::registrar_compra))
        .route("/api/inventarios/:producto_id/reposiciones", post(inventarios::registrar_reposicion));

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
