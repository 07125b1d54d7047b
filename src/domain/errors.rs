//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
}

// Conversion from SeaORM errors (used in infrastructure layer).
// RecordNotFound stays a database error: insert raises it when the new row
// cannot be read back.
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::RecordNotUpdated => DomainError::NotFound,
            other => DomainError::Database(other.to_string()),
        }
    }
}
