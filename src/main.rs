use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use customers_api::{config, db, seed, server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "customers_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = config::Config::from_env();

    // Initialize database
    let db = db::init_db(&config.database_url).await?;

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        match seed::seed_demo_data(&db).await {
            Ok(0) => tracing::info!("Customers table already populated, skipping seed."),
            Ok(n) => tracing::info!("Seeded {} demo customers.", n),
            Err(e) => tracing::error!("Failed to seed data: {}", e),
        }
    }

    let app = server::build_router(db, &config.cors_allowed_origins);

    // Find available port
    let port = server::find_available_port(config.port)
        .ok_or_else(|| format!("No available port near {}", config.port))?;

    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Customer Management API listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
