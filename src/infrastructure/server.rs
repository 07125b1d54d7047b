// Server module - Provides reusable HTTP server functionality

use axum::{Router, http::HeaderName, http::HeaderValue};
use sea_orm::DatabaseConnection;
use std::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{self, ApiVersion, SUPPORTED_VERSIONS_HEADER};
use crate::api_docs::ApiDoc;
use crate::infrastructure::AppState;

/// Build the full application router: `/api` routes, Swagger UI and middleware
pub fn build_router(db: DatabaseConnection, cors_allowed_origins: &[String]) -> Router {
    let state = AppState::new(db);

    let mut origins = Vec::new();
    for origin in cors_allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/v1/swagger.json", ApiDoc::openapi()))
        .nest("/api", api::api_router(state))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(SUPPORTED_VERSIONS_HEADER),
            ApiVersion::supported_header_value(),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Find an available port starting from the preferred port on a specific IP
pub fn find_available_port_on_ip(preferred_port: u16, ip: &str) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind((ip, preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    (preferred_port.saturating_add(1)..preferred_port.saturating_add(100))
        .find(|&port| TcpListener::bind((ip, port)).is_ok())
}

/// Find an available port starting from the preferred port (0.0.0.0)
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    find_available_port_on_ip(preferred_port, "0.0.0.0")
}
