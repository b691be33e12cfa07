//! SeaORM entities for the two tables plus the pooled connection.

pub mod db;
pub mod inventario;
pub mod producto;
