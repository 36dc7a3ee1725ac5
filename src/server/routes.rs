// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{analyze_handler, health_handler, index_handler, metrics_handler};
use super::middleware::request_id_layers;
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Headroom for multipart boundaries and headers on top of the image itself
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gemini_client: Arc<GeminiClient>,
}

pub fn create_router(config: AppConfig, gemini_client: GeminiClient) -> Result<Router> {
    let body_limit = config.upload.max_image_bytes + MULTIPART_OVERHEAD_BYTES;

    let state = AppState {
        config,
        gemini_client: Arc::new(gemini_client),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/v1/analyze", post(analyze_handler))
        // Replace axum's 2MB default with the configured upload limit
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
