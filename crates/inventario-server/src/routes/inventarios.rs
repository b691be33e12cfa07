use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use tracing::info;

use crate::errors::JsonApiError;
use crate::jsonapi::{CantidadAttrs, CompraAttrs, InventarioDocument, Peticion, ReposicionAttrs};
use crate::routes::InventarioState;

type Doc = Json<InventarioDocument>;

#[utoipa::path(
    get, path = "/api/inventarios/{producto_id}", tag = "inventarios",
    params(("producto_id" = i64, Path, description = "Producto id")),
    responses(
        (status = 200, description = "Stock con el producto incluido"),
        (status = 404, description = "Producto no encontrado"),
        (status = 503, description = "Servicio de productos no disponible")
    ),
    security(("api_key" = []))
)]
pub async fn obtener(
    State(state): State<InventarioState>,
    producto_id: Result<Path<i64>, PathRejection>,
) -> Result<Doc, JsonApiError> {
    let Path(producto_id) = producto_id?;
    let detalle = state.inventarios.obtener_por_producto(producto_id).await?;
    Ok(Json(InventarioDocument::from_detalle(detalle)))
}

#[utoipa::path(
    patch, path = "/api/inventarios/{producto_id}", tag = "inventarios",
    params(("producto_id" = i64, Path, description = "Producto id")),
    request_body = crate::openapi::CantidadRequestDoc,
    responses(
        (status = 200, description = "Cantidad actualizada"),
        (status = 400, description = "Parámetros inválidos"),
        (status = 404, description = "Producto no encontrado")
    ),
    security(("api_key" = []))
)]
pub async fn actualizar_cantidad(
    State(state): State<InventarioState>,
    producto_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Peticion<CantidadAttrs>>, JsonRejection>,
) -> Result<Doc, JsonApiError> {
    let Path(producto_id) = producto_id?;
    let Json(body) = payload?;
    let saved = state.inventarios.actualizar_cantidad(producto_id, body.data.attributes.cantidad).await?;
    info!(producto_id, cantidad = saved.cantidad, "inventario_update_request");
    Ok(Json(InventarioDocument::from_inventario(&saved)))
}

#[utoipa::path(
    post, path = "/api/inventarios/{producto_id}/compras", tag = "inventarios",
    params(("producto_id" = i64, Path, description = "Producto id")),
    request_body = crate::openapi::CompraRequestDoc,
    responses(
        (status = 200, description = "Compra registrada"),
        (status = 400, description = "Stock insuficiente o cantidad inválida")
    ),
    security(("api_key" = []))
)]
pub async fn registrar_compra(
    State(state): State<InventarioState>,
    producto_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Peticion<CompraAttrs>>, JsonRejection>,
) -> Result<Doc, JsonApiError> {
    let Path(producto_id) = producto_id?;
    let Json(body) = payload?;
    let saved = state.inventarios.registrar_compra(producto_id, body.data.attributes.cantidad_comprada).await?;
    Ok(Json(InventarioDocument::from_inventario(&saved)))
}

#[utoipa::path(
    post, path = "/api/inventarios/{producto_id}/reposiciones", tag = "inventarios",
    params(("producto_id" = i64, Path, description = "Producto id")),
    request_body = crate::openapi::ReposicionRequestDoc,
    responses(
        (status = 200, description = "Reposición registrada"),
        (status = 400, description = "Cantidad inválida")
    ),
    security(("api_key" = []))
)]
pub async fn registrar_reposicion(
    State(state): State<InventarioState>,
    producto_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Peticion<ReposicionAttrs>>, JsonRejection>,
) -> Result<Doc, JsonApiError> {
    let Path(producto_id) = producto_id?;
    let Json(body) = payload?;
    let saved = state.inventarios.registrar_reposicion(producto_id, body.data.attributes.cantidad_repuesta).await?;
    Ok(Json(InventarioDocument::from_inventario(&saved)))
}
