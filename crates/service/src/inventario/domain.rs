use serde::Serialize;

/// Stock row for one product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Inventario {
    pub producto_id: i64,
    pub cantidad: i32,
}

impl From<models::inventario::Model> for Inventario {
    fn from(m: models::inventario::Model) -> Self {
        Self { producto_id: m.producto_id, cantidad: m.cantidad }
    }
}

/// What the catalog tells us about a product when enriching a stock read.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductoResumen {
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InventarioDetalle {
    pub inventario: Inventario,
    pub producto: ProductoResumen,
}

/// Result of a conditional decrement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecrementOutcome {
    Applied(Inventario),
    Insufficient { disponible: i32 },
}
