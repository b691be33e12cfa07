use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductoInputDoc {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
}

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
        crate::routes::productos::crear,
        crate::routes::productos::obtener,
        crate::routes::productos::listar,
        crate::routes::productos::actualizar,
        crate::routes::productos::eliminar,
    ),
    components(schemas(HealthResponse, ProductoInputDoc)),
    modifiers(&ApiKeyAddon),
    tags((name = "health"), (name = "productos"))
)]
pub struct ApiDoc;
