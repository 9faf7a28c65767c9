//! Employee Management Server
//!
//! CRUD HTTP API for employee records, stored in SQLite (embedded) with an
//! in-memory read-through cache in front of lookups.

mod handlers;
mod services;
mod settings;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use services::EmployeeService;
use settings::ServerConfig;
use storage::{Database, MemoryCache};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub employee_service: Arc<EmployeeService>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Employee Management Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, data_dir={}, db={}, cache_ttl={:?}",
        config.bind_address,
        config.data_dir.display(),
        config.database_path,
        config.cache_ttl
    );

    let db = Arc::new(
        Database::new(&config.database_path)
            .await
            .context("Failed to initialize database")?,
    );

    let cache = Arc::new(MemoryCache::new());
    let employee_service = Arc::new(EmployeeService::new(db, cache, config.cache_ttl));

    let state = AppState { employee_service };
    let app = app(state);

    info!("Server listening on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Build the full HTTP router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(employee_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/employees",
            get(handlers::employees::list).delete(handlers::employees::delete_all),
        )
        .route("/employee", post(handlers::employees::create))
        .route(
            "/employee/:id",
            get(handlers::employees::get)
                .put(handlers::employees::update)
                .delete(handlers::employees::delete),
        )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
