//! JSON:API documents for the catalog. Field names are part of the public contract.

use serde::Serialize;
use service::pagination::Page;
use service::producto::domain::Producto;

pub const TIPO_PRODUCTO: &str = "productos";

#[derive(Debug, Serialize)]
pub struct JsonApiResponse<T> {
    pub data: Vec<Resource<T>>,
    pub meta: Option<Meta>,
}

#[derive(Debug, Serialize)]
pub struct Resource<T> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub attributes: T,
}

#[derive(Debug, Serialize)]
pub struct ProductoAttributes {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Meta {
    #[serde(rename = "total_Elementos_en_la_tabla")]
    pub total_elementos: u64,
    #[serde(rename = "total_Paginas")]
    pub total_paginas: u64,
    #[serde(rename = "Pagina_Actual")]
    pub pagina_actual: u64,
    #[serde(rename = "Elementos_por_Pagina")]
    pub elementos_por_pagina: u64,
}

#[derive(Debug, Serialize)]
pub struct Mensaje {
    pub mensaje: String,
}

fn resource(p: Producto) -> Resource<ProductoAttributes> {
    Resource {
        kind: TIPO_PRODUCTO,
        id: p.id.to_string(),
        attributes: ProductoAttributes { nombre: p.nombre, precio: p.precio },
    }
}

impl JsonApiResponse<ProductoAttributes> {
    pub fn from_producto(p: Producto) -> Self {
        Self { data: vec![resource(p)], meta: None }
    }

    pub fn from_page(page: Page<Producto>) -> Self {
        let meta = Meta {
            total_elementos: page.total_elements,
            total_paginas: page.total_pages,
            pagina_actual: page.number,
            elementos_por_pagina: page.size,
        };
        Self { data: page.items.into_iter().map(resource).collect(), meta: Some(meta) }
    }
}

impl JsonApiResponse<Mensaje> {
    pub fn eliminado(id: i64) -> Self {
        let data = Resource {
            kind: "mensaje",
            id: id.to_string(),
            attributes: Mensaje { mensaje: "Producto eliminado correctamente".into() },
        };
        Self { data: vec![data], meta: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_product_has_null_meta() {
        let doc = JsonApiResponse::from_producto(Producto { id: 1, nombre: Some("Widget".into()), precio: Some(9.99) });
        assert_eq!(
            serde_json::to_value(doc).unwrap(),
            json!({"data":[{"type":"productos","id":"1","attributes":{"nombre":"Widget","precio":9.99}}],"meta":null})
        );
    }

    #[test]
    fn page_meta_uses_contract_names() {
        let page = Page { items: vec![], total_elements: 41, total_pages: 3, number: 2, size: 20 };
        let v = serde_json::to_value(JsonApiResponse::from_page(page)).unwrap();
        assert_eq!(
            v["meta"],
            json!({"total_Elementos_en_la_tabla":41,"total_Paginas":3,"Pagina_Actual":2,"Elementos_por_Pagina":20})
        );
        assert_eq!(v["data"], json!([]));
    }
}
