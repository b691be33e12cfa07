//! JSON:API documents for stock rows, in and out.

use serde::{Deserialize, Serialize};
use service::inventario::domain::{Inventario, InventarioDetalle, ProductoResumen};

pub const TIPO_INVENTARIO: &str = "inventarios";
pub const TIPO_PRODUCTO: &str = "productos";

#[derive(Debug, Serialize)]
pub struct InventarioDocument {
    pub data: InventarioResource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ProductoResource>>,
}

#[derive(Debug, Serialize)]
pub struct InventarioResource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub attributes: InventarioAttributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
}

#[derive(Debug, Serialize)]
pub struct InventarioAttributes {
    #[serde(rename = "cantidad_restante_Inventario")]
    pub cantidad_restante: i32,
}

#[derive(Debug, Serialize)]
pub struct Relationships {
    pub producto: Relationship,
}

#[derive(Debug, Serialize)]
pub struct Relationship {
    pub data: Identifier,
}

#[derive(Debug, Serialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ProductoResource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub attributes: ProductoAttributes,
}

#[derive(Debug, Serialize)]
pub struct ProductoAttributes {
    pub nombre: String,
    pub precio: f64,
}

fn resource(i: &Inventario) -> InventarioResource {
    InventarioResource {
        kind: TIPO_INVENTARIO,
        id: i.producto_id.to_string(),
        attributes: InventarioAttributes { cantidad_restante: i.cantidad },
        relationships: None,
    }
}

impl InventarioDocument {
    /// Mutation responses carry the stock row only.
    pub fn from_inventario(i: &Inventario) -> Self {
        Self { data: resource(i), included: None }
    }

    /// Reads link the product and embed it under `included`.
    pub fn from_detalle(d: InventarioDetalle) -> Self {
        let mut data = resource(&d.inventario);
        let ProductoResumen { id, nombre, precio } = d.producto;
        data.relationships = Some(Relationships {
            producto: Relationship { data: Identifier { kind: TIPO_PRODUCTO, id: id.to_string() } },
        });
        let included = vec![ProductoResource {
            kind: TIPO_PRODUCTO,
            id: id.to_string(),
            attributes: ProductoAttributes { nombre, precio },
        }];
        Self { data, included: Some(included) }
    }
}

/// `{"data":{"attributes":{...}}}`; other members are ignored.
#[derive(Debug, Deserialize)]
pub struct Peticion<A> {
    pub data: PeticionDatos<A>,
}

#[derive(Debug, Deserialize)]
pub struct PeticionDatos<A> {
    pub attributes: A,
}

#[derive(Debug, Deserialize)]
pub struct CantidadAttrs {
    pub cantidad: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompraAttrs {
    pub cantidad_comprada: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReposicionAttrs {
    pub cantidad_repuesta: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_document_links_and_includes_producto() {
        let d = InventarioDetalle {
            inventario: Inventario { producto_id: 1, cantidad: 7 },
            producto: ProductoResumen { id: 1, nombre: "Widget".into(), precio: 9.99 },
        };
        assert_eq!(
            serde_json::to_value(InventarioDocument::from_detalle(d)).unwrap(),
            json!({
                "data": {
                    "type": "inventarios",
                    "id": "1",
                    "attributes": {"cantidad_restante_Inventario": 7},
                    "relationships": {"producto": {"data": {"type": "productos", "id": "1"}}}
                },
                "included": [{"type": "productos", "id": "1", "attributes": {"nombre": "Widget", "precio": 9.99}}]
            })
        );
    }

    #[test]
    fn mutation_document_has_data_only() {
        let v = serde_json::to_value(InventarioDocument::from_inventario(&Inventario { producto_id: 3, cantidad: 0 }))
            .unwrap();
        assert_eq!(v, json!({"data": {"type": "inventarios", "id": "3", "attributes": {"cantidad_restante_Inventario": 0}}}));
    }

    #[test]
    fn request_bodies_use_camel_case() {
        let p: Peticion<CompraAttrs> =
            serde_json::from_value(json!({"data": {"type": "inventarios", "attributes": {"cantidadComprada": 3}}})).unwrap();
        assert_eq!(p.data.attributes.cantidad_comprada, 3);
        let missing = serde_json::from_value::<Peticion<ReposicionAttrs>>(json!({"data": {"attributes": {}}}));
        assert!(missing.is_err());
    }
}
