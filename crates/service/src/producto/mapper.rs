use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::errors::ServiceError;

use super::domain::Producto;

pub fn to_domain(m: models::producto::Model) -> Producto {
    Producto { id: m.id, nombre: m.nombre, precio: m.precio.and_then(|p| p.to_f64()) }
}

/// Prices are stored with two decimals.
pub fn precio_to_decimal(precio: f64) -> Result<Decimal, ServiceError> {
    Decimal::from_f64(precio)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| ServiceError::InvalidArgument(format!("precio inválido: {precio}")))
}
