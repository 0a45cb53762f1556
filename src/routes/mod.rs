//! API Routes
//!
//! - `/api/analyze` - Document upload and trend/report generation
//! - `/api/health` - Liveness check

pub mod analyze;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use crate::middleware::cors_layer;
use crate::models::AppState;
use tracing::info;

/// Create the main application router
///
/// Every route is CORS-enabled and traced; upload size is capped by
/// `server.max_upload_bytes`.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let server = state.config.server.clone();

    Router::new()
        .merge(analyze::router(state))
        .merge(health::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&server.cors_allowed_origins))
                .layer(DefaultBodyLimit::max(server.max_upload_bytes)),
        )
}
