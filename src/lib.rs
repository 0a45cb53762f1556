// Finance Watch - financial trend extraction and weekly reports from uploaded documents

pub mod config;
pub mod models;
pub mod types;
pub mod agents;
pub mod analysis;
pub mod documents;
pub mod llm;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
