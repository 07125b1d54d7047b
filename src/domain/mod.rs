//! Domain layer - Pure business abstractions
//!
//! This layer contains NO persistence or HTTP framework dependencies (no SeaORM, no Axum).
//! Only entity types, trait definitions, input validation and domain error types.

pub mod errors;
pub mod repositories;
pub mod validation;

pub use errors::DomainError;
pub use repositories::*;
pub use validation::{CustomerDto, FieldViolation, ValidationErrors};
