//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use super::DomainError;

/// Customer data for API responses
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    #[schema(example = "Raheem")]
    pub first_name: String,
    #[schema(example = "Khan")]
    pub last_name: String,
    pub date_of_birth: NaiveDateTime,
}

/// Validated input for creating or updating a customer.
///
/// Only obtainable through [`CustomerDto::validate`](super::CustomerDto::validate),
/// so holding one means the field constraints already passed.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerInput {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) date_of_birth: NaiveDateTime,
}

impl CustomerInput {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn date_of_birth(&self) -> NaiveDateTime {
        self.date_of_birth
    }
}

/// Predicate over first and last name, evaluated by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePredicate {
    /// Both names equal the given pair, ignoring case
    SameName {
        first_name: String,
        last_name: String,
    },
    /// Either name contains the text, ignoring case
    NameContains(String),
}

/// Repository trait for Customer entity
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find all customers, ordered by id
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError>;

    /// Find a customer by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;

    /// Insert a new customer; the store assigns the id
    async fn insert(&self, input: CustomerInput) -> Result<Customer, DomainError>;

    /// Replace the stored record matching `customer.id`
    async fn update(&self, customer: Customer) -> Result<Customer, DomainError>;

    /// Delete a customer by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Find customers whose names satisfy the predicate
    async fn scan(&self, predicate: &NamePredicate) -> Result<Vec<Customer>, DomainError>;
}
