//! Producto catalog: domain, repository, service.

pub mod domain;
pub mod mapper;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::ProductoService;
