use std::fmt::Display;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure taxonomy shared by both services; each HTTP surface decides how to render it.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    DependencyConflict(String),
    #[error("{0}")]
    Communication(String),
    /// Storage refused the write because a foreign key would dangle.
    #[error("referential integrity violation: {0}")]
    ForeignKey(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    /// `Producto no encontrado con id: '7'`
    pub fn not_found(recurso: &str, campo: &str, valor: impl Display) -> Self {
        Self::NotFound(format!("{recurso} no encontrado con {campo}: '{valor}'"))
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::ForeignKey(detail),
            _ => Self::Db(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_resource_and_key() {
        let e = ServiceError::not_found("Producto", "id", 99);
        assert_eq!(e.to_string(), "Producto no encontrado con id: '99'");
    }

    #[test]
    fn plain_db_errors_stay_generic() {
        let e: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(e, ServiceError::Db(msg) if msg.contains("boom")));
    }
}
