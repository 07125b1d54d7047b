//! Customer Service - Pure business logic without HTTP layer
//!
//! CRUD, name search and the duplicate check on top of a [`CustomerRepository`].
//! The duplicate check and the write that follows it are separate store calls,
//! so two concurrent creators with the same name pair can both succeed.

use std::sync::Arc;

use crate::domain::{Customer, CustomerInput, CustomerRepository, DomainError, NamePredicate};

#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    /// List every customer, unfiltered
    pub async fn list_customers(&self) -> Result<Vec<Customer>, DomainError> {
        let customers = self.repo.find_all().await?;
        tracing::debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Get a single customer; a missing id is `Ok(None)`
    pub async fn get_customer(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// True when a customer with the same first and last name exists, ignoring case
    pub async fn customer_exists(&self, input: &CustomerInput) -> Result<bool, DomainError> {
        let predicate = NamePredicate::SameName {
            first_name: input.first_name().to_string(),
            last_name: input.last_name().to_string(),
        };
        let matches = self.repo.scan(&predicate).await?;
        Ok(!matches.is_empty())
    }

    /// Insert a new customer. Callers run [`Self::customer_exists`] first;
    /// duplicates are not rejected here.
    pub async fn create_customer(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        let customer = self.repo.insert(input).await?;
        tracing::info!(
            id = customer.id,
            first_name = %customer.first_name,
            last_name = %customer.last_name,
            "Customer created"
        );
        Ok(customer)
    }

    /// Overwrite names and date of birth of an existing customer; the id is kept
    pub async fn update_customer(
        &self,
        id: i32,
        input: CustomerInput,
    ) -> Result<Customer, DomainError> {
        let mut customer = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;

        customer.first_name = input.first_name;
        customer.last_name = input.last_name;
        customer.date_of_birth = input.date_of_birth;

        let updated = self.repo.update(customer).await?;
        tracing::info!(id, "Customer updated");
        Ok(updated)
    }

    /// Remove a customer. Fails with `NotFound` before touching the store if the id is absent.
    pub async fn delete_customer(&self, id: i32) -> Result<(), DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;

        self.repo.delete(id).await?;
        tracing::info!(id, "Customer deleted");
        Ok(())
    }

    /// Customers whose first or last name contains `filter`, ignoring case
    pub async fn find_customers_by_name(&self, filter: &str) -> Result<Vec<Customer>, DomainError> {
        self.repo
            .scan(&NamePredicate::NameContains(filter.to_string()))
            .await
    }
}
