//! Axum-based HTTP server for calorie-advisor.
//!
//! Serves the upload page and the analysis endpoint that runs one image
//! through the submission pipeline.
//!
//! # Components
//!
//! - `handlers`: Individual endpoints (page, analyze, health, metrics).
//! - `middleware`: Request ID tracking.
//! - `routes`: The router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{AnalysisResponse, HealthCheck, HealthResponse, IMAGE_FIELD};
pub use routes::{create_router, AppState};
