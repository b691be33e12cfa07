pub mod errors;
pub mod jsonapi;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use routes::{build_router, ProductoState};
pub use startup::run;
