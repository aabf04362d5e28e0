mod errors;
mod handlers;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::engine::ImportEngine;

pub use errors::ApiError;

/// Name of the multipart field carrying the CSV file.
pub const FILE_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ImportEngine>
}

/// Builds the HTTP router serving `POST /api/import`.
pub fn router(engine: Arc<ImportEngine>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/import", post(handlers::import_deals))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { engine })
}
