use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::pagination::Pagination;
use service::producto::domain::ProductoInput;
use tracing::info;
use utoipa::IntoParams;

use crate::errors::JsonApiError;
use crate::jsonapi::{JsonApiResponse, Mensaje, ProductoAttributes};
use crate::routes::ProductoState;

type ProductoDoc = Json<JsonApiResponse<ProductoAttributes>>;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Zero-based page index
    pub page: Option<u64>,
    /// Page size, 1..=2000
    pub size: Option<u64>,
}

#[utoipa::path(
    post, path = "/api/productos", tag = "productos",
    request_body = crate::openapi::ProductoInputDoc,
    responses(
        (status = 201, description = "Producto creado"),
        (status = 400, description = "Solicitud inválida"),
        (status = 403, description = "API Key inválida o no proporcionada")
    ),
    security(("api_key" = []))
)]
pub async fn crear(
    State(state): State<ProductoState>,
    payload: Result<Json<ProductoInput>, JsonRejection>,
) -> Result<(StatusCode, ProductoDoc), JsonApiError> {
    let Json(input) = payload?;
    let p = state.productos.crear(input).await?;
    info!(producto_id = p.id, "producto_create_request");
    Ok((StatusCode::CREATED, Json(JsonApiResponse::from_producto(p))))
}

#[utoipa::path(
    get, path = "/api/productos/{id}", tag = "productos",
    params(("id" = i64, Path, description = "Producto id")),
    responses(
        (status = 200, description = "Producto encontrado"),
        (status = 404, description = "Recurso no encontrado")
    ),
    security(("api_key" = []))
)]
pub async fn obtener(
    State(state): State<ProductoState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ProductoDoc, JsonApiError> {
    let Path(id) = id?;
    let p = state.productos.obtener(id).await?;
    Ok(Json(JsonApiResponse::from_producto(p)))
}

#[utoipa::path(
    get, path = "/api/productos", tag = "productos",
    params(ListQuery),
    responses((status = 200, description = "Página de productos ordenada por id")),
    security(("api_key" = []))
)]
pub async fn listar(
    State(state): State<ProductoState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ProductoDoc, JsonApiError> {
    let Query(q) = query?;
    let page = state.productos.listar(Pagination::new(q.page, q.size)).await?;
    Ok(Json(JsonApiResponse::from_page(page)))
}

#[utoipa::path(
    put, path = "/api/productos/{id}", tag = "productos",
    params(("id" = i64, Path, description = "Producto id")),
    request_body = crate::openapi::ProductoInputDoc,
    responses(
        (status = 200, description = "Producto actualizado"),
        (status = 404, description = "Recurso no encontrado")
    ),
    security(("api_key" = []))
)]
pub async fn actualizar(
    State(state): State<ProductoState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductoInput>, JsonRejection>,
) -> Result<ProductoDoc, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let p = state.productos.actualizar(id, input).await?;
    Ok(Json(JsonApiResponse::from_producto(p)))
}

#[utoipa::path(
    delete, path = "/api/productos/{id}", tag = "productos",
    params(("id" = i64, Path, description = "Producto id")),
    responses(
        (status = 200, description = "Producto eliminado correctamente"),
        (status = 400, description = "No se puede eliminar el producto"),
        (status = 404, description = "Recurso no encontrado")
    ),
    security(("api_key" = []))
)]
pub async fn eliminar(
    State(state): State<ProductoState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<JsonApiResponse<Mensaje>>, JsonApiError> {
    let Path(id) = id?;
    state.productos.eliminar(id).await?;
    Ok(Json(JsonApiResponse::eliminado(id)))
}
