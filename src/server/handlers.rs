// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{AdvisorError, Result};
use crate::vision::RawUpload;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Multipart field carrying the uploaded image
pub const IMAGE_FIELD: &str = "image";

/// The upload page
const INDEX_HTML: &str = include_str!("index.html");

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// The model's answer, verbatim
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Reports configuration only; never calls Gemini.
///
/// A running server always has an API key, since the client refuses to
/// start without one.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();

    checks.insert(
        "configuration".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "Model: {}, API base: {}",
                state.gemini_client.model(),
                state.gemini_client.base_url()
            ),
        },
    );

    Json(HealthResponse {
        status: "healthy".to_string(),
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> Result<impl IntoResponse> {
    let body = crate::metrics::gather_metrics()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}

/// Handler for `POST /v1/analyze`: one image in, the model's text out.
pub async fn analyze_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>> {
    let max_image_bytes = state.config.upload.max_image_bytes;
    let upload = read_image_field(multipart, max_image_bytes).await?;

    match &upload {
        Some(raw) => info!(
            "Received submission: file={:?}, content_type={:?}, {} bytes",
            raw.file_name,
            raw.content_type,
            raw.bytes.len()
        ),
        None => info!("Received submission without an image"),
    }

    let text = crate::pipeline::analyze(&state.gemini_client, upload, max_image_bytes).await?;

    Ok(Json(AnalysisResponse { text }))
}

/// Take the first `image` field; later files are ignored so exactly one
/// image ever reaches the model.
async fn read_image_field(
    mut multipart: Multipart,
    max_image_bytes: usize,
) -> Result<Option<RawUpload>> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_image_bytes, "Failed to read multipart field"))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        if upload.is_some() {
            debug!("Ignoring additional image field");
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_image_bytes, "Failed to read image"))?;

        upload = Some(RawUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    // Browsers submit an empty, unnamed part when no file was picked
    Ok(upload.filter(|raw| !(raw.bytes.is_empty() && raw.file_name.as_deref().unwrap_or("").is_empty())))
}

/// A body cut off at the size limit is an oversized image, not a malformed form.
fn multipart_error(e: MultipartError, max_image_bytes: usize, context: &str) -> AdvisorError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload rejected at the body limit");
        AdvisorError::UploadTooLarge {
            max: max_image_bytes,
        }
    } else {
        AdvisorError::InvalidRequest(format!("{}: {}", context, e))
    }
}
