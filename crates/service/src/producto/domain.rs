use serde::{Deserialize, Serialize};

/// A catalog entry as the rest of the system sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub nombre: Option<String>,
    pub precio: Option<f64>,
}

/// Client-supplied attributes for create and update. Any `id` in the payload is ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProductoInput {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub precio: Option<f64>,
}
