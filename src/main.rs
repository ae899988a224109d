//! Portfolio Backend
//!
//! Serves portfolio projects and owner settings from a remote store, falling back
//! to a local file store when the remote is unreachable.

mod api;
mod auth;
mod config;
mod errors;
mod local;
mod models;
mod remote;
mod service;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use local::{FileStorage, LocalStore};
use remote::{PostgrestStore, RemoteAdapter, RemoteStore, SqliteStore};
use service::PortfolioService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PortfolioService>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Portfolio Backend");
    tracing::info!("Local data directory: {:?}", config.data_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_key.is_none() {
        tracing::warn!("No admin key configured (PORTFOLIO_ADMIN_KEY). Dashboard routes are open!");
    }

    // Initialize local fallback store
    let local = LocalStore::new(Arc::new(FileStorage::open(&config.data_dir)?));
    local.initialize()?;

    // Initialize remote store
    let remote: Arc<dyn RemoteStore> = match &config.remote {
        Some(remote_config) => {
            tracing::info!("Remote store: PostgREST at {}", remote_config.url);
            Arc::new(PostgrestStore::new(remote_config))
        }
        None => {
            tracing::info!("Remote store: SQLite at {:?}", config.db_path);
            let pool = remote::init_database(&config.db_path).await?;
            Arc::new(SqliteStore::new(pool))
        }
    };

    let adapter = RemoteAdapter::new(remote, local.clone());
    let state = AppState {
        service: Arc::new(PortfolioService::new(adapter, local)),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the admin key for the auth layer
    let admin_key = state.config.admin_key.clone();

    // Dashboard routes
    let admin_routes = Router::new()
        .route("/projects", post(api::create_project))
        .route(
            "/projects/{id}",
            axum::routing::put(api::update_project).delete(api::delete_project),
        )
        .route("/settings", axum::routing::put(api::save_settings))
        .route("/local/export", get(api::export_local))
        .route("/local/import", post(api::import_local))
        .route("/local/reset", post(api::reset_local))
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_key_layer(admin_key.clone(), req, next)
        }));

    // Visitor routes
    let public_routes = Router::new()
        .route("/projects", get(api::list_projects))
        .route("/projects/{id}", get(api::get_project))
        .route("/settings", get(api::get_settings));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
