use application::DonorApp;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

mod dto;
mod error;
mod handlers;

pub use dto::*;
pub use error::ApiError;

/// Header carrying the shared admin secret.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

#[derive(Clone)]
pub struct AppState {
    pub donor_app: Arc<DonorApp>,
    pub environment: String,
}

impl AppState {
    pub fn new(donor_app: DonorApp, environment: impl Into<String>) -> Self {
        Self {
            donor_app: Arc::new(donor_app),
            environment: environment.into(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Public donor endpoints
        .route(
            "/api/donors",
            get(handlers::search_donors).post(handlers::register_donor),
        )
        .route("/api/nlp", post(handlers::chat_query))
        // Admin endpoints
        .route("/api/admin-check", get(handlers::admin_check))
        .route("/api/admin/donors", get(handlers::admin_list_donors))
        .route(
            "/api/admin/donors/:id",
            axum::routing::put(handlers::admin_update_donor).delete(handlers::admin_delete_donor),
        )
        // System info endpoints
        .route("/api/status", get(handlers::system_status))
        .route("/health", get(handlers::health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `bind_address` and serves until `shutdown` resolves.
pub async fn serve<F>(state: AppState, bind_address: &str, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("API Server listening on http://{}", bind_address);
    info!("   GET    /api/donors            - Search donors (bloodType, location, lat, lng, available)");
    info!("   POST   /api/donors            - Register a donor");
    info!("   POST   /api/nlp               - Free-text donor query");
    info!("   GET    /api/admin-check       - Verify admin key");
    info!("   GET    /api/admin/donors      - List all donors (admin)");
    info!("   PUT    /api/admin/donors/:id  - Replace a donor (admin)");
    info!("   DELETE /api/admin/donors/:id  - Delete a donor (admin)");
    info!("   GET    /api/status            - System status");
    info!("   GET    /health                - Health check");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
