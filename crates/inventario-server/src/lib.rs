pub mod errors;
pub mod jsonapi;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use routes::{build_router, InventarioState};
pub use startup::run;
