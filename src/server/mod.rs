pub mod error;
pub mod handlers;
pub mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::extraction::ReferenceCatalog;
use crate::ocr::OcrClient;

/// Shared, read-only collaborators of the request handlers.
///
/// Both members are set up once at startup and never mutated, so cloning the
/// state per request is just two `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    pub ocr: Arc<OcrClient>,
    pub catalog: Arc<ReferenceCatalog>,
}

impl AppState {
    pub fn new(ocr: OcrClient, catalog: ReferenceCatalog) -> Self {
        Self {
            ocr: Arc::new(ocr),
            catalog: Arc::new(catalog),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/parse", post(handlers::parse_report))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting server on {}", addr);

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API endpoint: http://{}/api/v1/parse", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
