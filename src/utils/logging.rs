//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! the Gemini API key from leaking into logs.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{AdvisorError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AdvisorError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let initialized = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    initialized.map_err(|e| AdvisorError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// Sanitizes secrets from log messages.
///
/// Replaces every Google API key (`AIza...`) and every `key=` query parameter
/// value with a `\[REDACTED\]` placeholder.
pub fn sanitize(input: &str) -> String {
    let mut result = redact_after(input, "AIza", "[REDACTED_API_KEY]", true);
    result = redact_after(&result, "key=", "[REDACTED]", false);
    result
}

/// Redact every run of token characters that follows `marker`.
/// With `include_marker` the marker itself is replaced too.
fn redact_after(input: &str, marker: &str, placeholder: &str, include_marker: bool) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let token_start = pos + marker.len();
        let token_len = rest[token_start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len() - token_start);

        let keep_until = if include_marker { pos } else { token_start };
        output.push_str(&rest[..keep_until]);
        output.push_str(placeholder);
        rest = &rest[token_start + token_len..];
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_api_key() {
        let input = "x-goog-api-key: AIzaSyD-EXAMPLE_key123 sent";
        let output = sanitize(input);
        assert_eq!(output, "x-goog-api-key: [REDACTED_API_KEY] sent");
    }

    #[test]
    fn test_sanitize_query_key() {
        let input = "error sending request for url (https://host/v1beta/models/m:generateContent?key=secret123&alt=json)";
        let output = sanitize(input);
        assert!(output.contains("?key=[REDACTED]&alt=json"));
        assert!(!output.contains("secret123"));
    }

    #[test]
    fn test_sanitize_multiple_and_clean_input() {
        let output = sanitize("AIzaOne and AIzaTwo");
        assert_eq!(output, "[REDACTED_API_KEY] and [REDACTED_API_KEY]");
        assert_eq!(sanitize("nothing secret here"), "nothing secret here");
    }
}
