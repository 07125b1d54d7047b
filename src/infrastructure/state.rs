//! Application state containing the customer service and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::infrastructure::SeaOrmCustomerRepository;
use crate::services::CustomerService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Customer service over the SeaORM repository
    pub customers: CustomerService,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let customer_repo = Arc::new(SeaOrmCustomerRepository::new(db));

        Self {
            customers: CustomerService::new(customer_repo),
        }
    }
}
