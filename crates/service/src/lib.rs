//! Service layer for the catalog and the stock ledger.
//! - Business rules live in `producto::service` and `inventario::service`.
//! - Persistence sits behind repository traits with SeaORM and in-memory implementations.
//! - `producto_client` is how the stock ledger reaches the catalog over HTTP.

pub mod errors;
pub mod inventario;
pub mod pagination;
pub mod producto;
pub mod producto_client;
#[cfg(test)]
pub mod test_support;
