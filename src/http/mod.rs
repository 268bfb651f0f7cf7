//! HTTP surface of the catalog.
//!
//! | Method | Path               | Response                          |
//! |--------|--------------------|-----------------------------------|
//! | GET    | `/`                | `{"message": "Hello, world!"}`    |
//! | POST   | `/items`           | 201, the created item             |
//! | GET    | `/items`           | `{"items": [...]}`                |
//! | GET    | `/items/{id}`      | the item                          |
//! | GET    | `/search?keyword=` | `{"items": [...]}`                |
//! | GET    | `/image/{file}`    | `image/jpeg` bytes                |
//!
//! Errors are `{"error": "..."}` with 400, 404, 413 or 500.

mod error;
mod handlers;
mod types;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::service::CatalogService;

pub use error::AppError;
pub use types::{ErrorResponse, ItemsResponse, MessageResponse, SearchQuery};

/// Room for the text fields and multipart framing around the image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: CatalogService,
    pub max_upload_bytes: usize,
}

/// Builds the router with CORS, request tracing and the body limit applied.
///
/// # Errors
///
/// Returns an error if `server.front_url` is not a valid header value.
pub fn router(service: CatalogService, server: &ServerConfig) -> Result<Router> {
    let origin: HeaderValue = server
        .front_url
        .parse()
        .with_context(|| format!("Invalid front_url: {}", server.front_url))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let state = AppState {
        service,
        max_upload_bytes: server.max_upload_bytes,
    };

    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/items", get(handlers::list_items).post(handlers::add_item))
        .route("/items/{id}", get(handlers::get_item))
        .route("/search", get(handlers::search_items))
        .route("/image/{filename}", get(handlers::get_image))
        .layer(DefaultBodyLimit::max(
            server.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Binds `addr` and serves `router` until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(router: Router, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
