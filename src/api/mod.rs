pub mod customers;
pub mod error;
pub mod health;
pub mod version;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::infrastructure::AppState;

pub use error::ApiError;
pub use version::{API_VERSION_HEADER, ApiVersion, SUPPORTED_VERSIONS_HEADER};

/// Versioned customer routes, relative to the `/api` prefix
pub fn customer_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/CustomerManagement/:id",
            get(customers::get_customer_by_id),
        )
        .route(
            "/CustomerManagement/Customers/AddCustomer",
            put(customers::add_customer),
        )
        .route(
            "/CustomerManagement/Customers/GetCustomers",
            get(customers::get_customers),
        )
        .route(
            "/CustomerManagement/Customers/:id",
            put(customers::update_customer).delete(customers::delete_customer),
        )
        .route_layer(middleware::from_fn(version::require_api_version))
        .with_state(state)
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Customers
        .merge(customer_router(state))
}
