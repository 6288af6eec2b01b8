use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use domain_users::MongoUserRepository;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    let _ = color_eyre::install();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing();

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    let mongo_client = database::connect_from_config(&config.mongodb).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    // Unique indexes on account and email back the duplicate-key
    // classification; they must exist before the first write.
    MongoUserRepository::new(db.clone())
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create indexes: {}", e))?;

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let app = api::routes(&state)
        .merge(
            RapiDoc::with_openapi("/api-docs/openapi.json", openapi::ApiDoc::openapi())
                .path("/docs"),
        )
        // Every origin is allowed, matching the service's open CORS policy
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(state.config.server.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Registry API shutdown complete");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves on ctrl-c or SIGTERM, letting in-flight requests finish
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
