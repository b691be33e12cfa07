use serde::Deserialize;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CantidadAttributesDoc { pub cantidad: i32 }

#[derive(ToSchema)]
pub struct CantidadDataDoc { pub attributes: CantidadAttributesDoc }

/// `{"data":{"attributes":{"cantidad":25}}}`
#[derive(ToSchema)]
pub struct CantidadRequestDoc { pub data: CantidadDataDoc }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompraAttributesDoc { pub cantidad_comprada: i32 }

#[derive(ToSchema)]
pub struct CompraDataDoc { pub attributes: CompraAttributesDoc }

#[derive(ToSchema)]
pub struct CompraRequestDoc { pub data: CompraDataDoc }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReposicionAttributesDoc { pub cantidad_repuesta: i32 }

#[derive(ToSchema)]
pub struct ReposicionDataDoc { pub attributes: ReposicionAttributesDoc }

#[derive(ToSchema)]
pub struct ReposicionRequestDoc { pub data: ReposicionDataDoc }

struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(common::api_key::API_KEY_HEADER))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::inventarios::obtener,
        crate::routes::inventarios::actualizar_cantidad,
        crate::routes::inventarios::registrar_compra,
        crate::routes::inventarios::registrar_reposicion,
    ),
    components(schemas(
        HealthResponse,
        CantidadAttributesDoc,
        CantidadDataDoc,
        CantidadRequestDoc,
        CompraAttributesDoc,
        CompraDataDoc,
        CompraRequestDoc,
        ReposicionAttributesDoc,
        ReposicionDataDoc,
        ReposicionRequestDoc,
    )),
    modifiers(&ApiKeyAddon),
    tags((name = "health"), (name = "inventarios"))
)]
pub struct ApiDoc;
