//! Inventario stock ledger: domain, repository, events, service.

pub mod domain;
pub mod events;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::InventarioService;
