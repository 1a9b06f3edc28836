//! Nifty Option Chain Backend Server
//!
//! REST API server exposing today's NIFTY option chain and its
//! change-in-open-interest compartments.

use nifty_chain_backend::api::create_router;
use nifty_chain_backend::config::{Config, DatabaseConfig};
use nifty_chain_backend::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use nifty_chain_backend::models::{
    AnalysisResponse, HealthResponse, IndexesResponse, OptionKind, OptionRecord, RefreshResponse,
    SpotPrice,
};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        nifty_chain_backend::api::handlers::health_check,
        nifty_chain_backend::api::handlers::refresh,
        nifty_chain_backend::api::handlers::refresh_analysis,
        nifty_chain_backend::api::handlers::refresh_indexes,
    ),
    components(
        schemas(
            HealthResponse,
            OptionKind,
            OptionRecord,
            SpotPrice,
            RefreshResponse,
            AnalysisResponse,
            IndexesResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Nifty", description = "Option chain feed and compartment analysis"),
        (name = "Indexes", description = "Index spot prices"),
    ),
    info(
        title = "Nifty Option Chain API",
        version = "0.1.0",
        description = "REST API for NIFTY option chain analysis",
        license(name = "MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let mut config = Config::load_or_default(&config_path)?;
    info!("Loaded configuration from {}", config_path);

    // Environment overrides
    if let Ok(host) = std::env::var("HOST") {
        config.server.host = host;
    }
    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port.parse()?;
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        let run_migrations = config
            .database
            .as_ref()
            .is_some_and(|database| database.run_migrations);
        config.database = Some(DatabaseConfig {
            url,
            run_migrations,
        });
    }
    config.validate()?;

    // Create application state
    let state = Arc::new(AppState::from_config(&config).await?);
    info!("Trading day is {}", state.calendar.today());

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Starting Nifty Option Chain Backend on {}:{}", host, port);
    info!(
        "Swagger UI available at http://{}:{}/swagger-ui/",
        host, port
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
