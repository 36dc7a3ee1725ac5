// Gemini API client for single-shot image analysis
// Author: kelexine (https://github.com/kelexine)

use crate::analysis::InferenceRequest;
use crate::config::GeminiConfig;
use crate::credentials::ApiKey;
use crate::error::{AdvisorError, Result};
use crate::metrics;
use crate::models::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part,
    REFUSAL_FINISH_REASONS,
};
use crate::utils::logging::sanitize;
use base64::Engine;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Client for the Google Gemini API.
///
/// Sends one `generateContent` call per [`InferenceRequest`] and hands back
/// the model's text unmodified. There is no retry, no caching and no state
/// shared between calls beyond the HTTP connection pool.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    api_key: ApiKey,
}

impl GeminiClient {
    /// Create a new Gemini client from explicit configuration.
    ///
    /// Fails with `AdvisorError::Config` when no API key was resolved.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_blank())
            .ok_or_else(|| {
                AdvisorError::Config(format!(
                    "Gemini API key missing: set {} or gemini.api_key",
                    crate::config::API_KEY_ENV
                ))
            })?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| AdvisorError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Created Gemini client for model {} ({}s timeout)",
            config.model, config.timeout_seconds
        );

        Ok(Self {
            http_client,
            config: config.clone(),
            api_key,
        })
    }

    /// The model every request is sent to
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Call Gemini `generateContent` with the instruction and the image.
    ///
    /// Returns the concatenated text of the first candidate exactly as sent.
    pub async fn infer(&self, request: InferenceRequest) -> Result<String> {
        let started = Instant::now();
        let result = self.send(request).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::record_inference(self.model(), outcome, started.elapsed().as_secs_f64());

        result
    }

    async fn send(&self, request: InferenceRequest) -> Result<String> {
        let url = self.endpoint();
        let body = wire_request(request);

        debug!("Calling generateContent API for model: {}", self.config.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    format!("request timed out after {}s", self.config.timeout_seconds)
                } else if e.is_connect() {
                    format!("could not connect to {}", self.config.api_base_url)
                } else {
                    format!("HTTP error: {}", sanitize(&e.to_string()))
                };
                error!("Gemini request failed: {}", reason);
                AdvisorError::InferenceUnavailable(reason)
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AdvisorError::InferenceUnavailable(format!(
                "Failed to read response body: {}",
                sanitize(&e.to_string())
            ))
        })?;

        if !status.is_success() {
            let message = extract_error_message(&response_text)
                .unwrap_or_else(|| response_text.clone());
            error!(
                "Gemini API error: HTTP {} - {}",
                status,
                sanitize(&message)
            );
            return Err(classify_status(status, message));
        }

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        let gemini_response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!("Failed to parse Gemini response: {}", e);
                AdvisorError::InferenceUnavailable(format!("Response parsing error: {}", e))
            })?;

        extract_answer(gemini_response)
    }
}

/// Wrap an inference request in the `generateContent` body: one user turn
/// holding the instruction text, then the base64 image.
pub fn wire_request(request: InferenceRequest) -> GenerateContentRequest {
    let (instruction, image) = request.into_parts();
    let data = base64::engine::general_purpose::STANDARD.encode(image.bytes());

    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::text(instruction),
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.content_type().to_string(),
                        data,
                    },
                },
            ],
        }],
    }
}

/// Map a non-success HTTP status onto the error taxonomy.
///
/// Statuses that say "this input will never work" are rejections; everything
/// else (auth, quota, upstream outages) is an availability failure.
pub fn classify_status(status: StatusCode, message: String) -> AdvisorError {
    match status.as_u16() {
        400 | 413 | 415 | 422 => {
            AdvisorError::InferenceRejected(format!("HTTP {}: {}", status.as_u16(), message))
        }
        _ => AdvisorError::InferenceUnavailable(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

/// Pull the answer out of a successful response, or explain why there is none.
pub fn extract_answer(response: GenerateContentResponse) -> Result<String> {
    if let Some(usage) = &response.usage_metadata {
        debug!(
            "Token usage: prompt={:?}, candidates={:?}, total={:?}",
            usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
        );
    }

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        warn!("Gemini blocked the prompt: {}", reason);
        return Err(AdvisorError::InferenceRejected(format!(
            "the model declined the image (block reason: {})",
            reason
        )));
    }

    if let Some(text) = response.text() {
        return Ok(text);
    }

    let finish_reason = response
        .candidates
        .first()
        .and_then(|c| c.finish_reason.clone());

    match finish_reason {
        None if response.candidates.is_empty() => Err(AdvisorError::InferenceRejected(
            "the model returned no candidates".to_string(),
        )),
        Some(reason) if REFUSAL_FINISH_REASONS.contains(&reason.as_str()) => {
            warn!("Gemini stopped without an answer: {}", reason);
            Err(AdvisorError::InferenceRejected(format!(
                "the model declined the image (finish reason: {})",
                reason
            )))
        }
        reason => Err(AdvisorError::InferenceUnavailable(format!(
            "the model returned no text (finish reason: {})",
            reason.as_deref().unwrap_or("unknown")
        ))),
    }
}

/// Extract error message from API response JSON
fn extract_error_message(response_text: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        error: Option<ErrorDetail>,
    }

    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
        status: Option<String>,
    }

    if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
        if let Some(error) = error_resp.error {
            return error.message.or(error.status);
        }
    }
    None
}
