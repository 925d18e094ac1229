pub mod contract_service;
pub mod presentation;
pub mod quotation_service;
pub mod recontract_service;

use sea_orm::DbErr;
use thiserror::Error;

/// Errors crossing the service boundary. Handlers map these onto HTTP
/// status codes; validation failures are detected before any write.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl ServiceError {
    /// Constraint violations surfaced by the driver at write/commit time are
    /// re-reported as client input errors, keeping the driver message as
    /// diagnostic detail. Anything else stays a database error.
    pub fn from_write_error(err: DbErr) -> Self {
        match err.sql_err() {
            Some(sql_err) => {
                ServiceError::Validation(format!("Database constraint error: {sql_err}"))
            }
            None => ServiceError::Database(err),
        }
    }
}
