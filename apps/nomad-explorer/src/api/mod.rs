//! # Web Surface
//!
//! Serves the explorer page and a JSON lookup endpoint using axum.
//!
//! ## Endpoints
//!
//! - `GET /?material=<formula>` - HTML page with input form and result
//! - `GET /api/lookup?material=<formula>` - Lookup as JSON
//! - `GET /health` - Health check
//!
//! ## Configuration (Environment Variables)
//!
//! - `NOMAD_CORS_ORIGINS`: comma-separated origins, or `*` (default: localhost)

mod handlers;
mod page;
mod types;

// Re-exports for integration tests (via `nomad_explorer::api::*`)
pub use handlers::{health_handler, index_handler, lookup_handler};
pub use page::{escape_html, render_page};
pub use types::{ErrorResponse, HealthResponse, LookupParams, LookupResponse};

use crate::client::NomadClient;
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use nomad_core::NomadError;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state. The client holds a connection pool and nothing else;
/// no lookup data outlives its request.
#[derive(Clone)]
pub struct AppState {
    pub client: NomadClient,
}

impl AppState {
    #[must_use]
    pub fn new(client: NomadClient) -> Self {
        Self { client }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Origins allowed when `NOMAD_CORS_ORIGINS` is unset or lists nothing usable.
const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:8080", "http://127.0.0.1:8080"];

/// Parse a comma-separated origin list, skipping blanks and invalid values.
fn parse_origins<'a>(list: impl IntoIterator<Item = &'a str>) -> Vec<HeaderValue> {
    list.into_iter()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(e) => {
                tracing::warn!(origin = o, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// CORS for a read-only surface: GET from `setting` (`*` or a list), else localhost.
fn cors_layer(setting: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);
    match setting.map(str::trim) {
        Some("*") => {
            tracing::warn!("CORS allows every origin (NOMAD_CORS_ORIGINS=*)");
            layer.allow_origin(Any)
        }
        Some(list) => {
            let origins = parse_origins(list.split(','));
            if origins.is_empty() {
                layer.allow_origin(parse_origins(LOCAL_ORIGINS))
            } else {
                layer.allow_origin(origins)
            }
        }
        None => layer.allow_origin(parse_origins(LOCAL_ORIGINS)),
    }
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner): tracing, then CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/api/lookup", get(handlers::lookup_handler))
        .route("/health", get(handlers::health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(
                    std::env::var("NOMAD_CORS_ORIGINS").ok().as_deref(),
                )),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(addr: &str, client: NomadClient) -> Result<(), NomadError> {
    let router = create_router(AppState::new(client));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| NomadError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("NOMAD explorer listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NomadError::IoError(format!("Server error: {}", e)))
}
