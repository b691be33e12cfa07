//! Pieces shared by both HTTP services: logging bootstrap, small response
//! types and the API-key header conventions.

pub mod api_key;
pub mod types;
pub mod utils;
