//! Configuration data structures for calorie-advisor.
//!
//! This module defines the schema for the application settings: the HTTP
//! server, the upstream Gemini model, upload limits and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::credentials::ApiKey;
use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Limits applied to uploaded images.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8501`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the upstream Gemini API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the public Generative Language API.
    /// Default: `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// The vision-capable Gemini model that analyzes the image.
    /// Default: `gemini-1.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on one inference call, in seconds.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// API key. Falls back to `GOOGLE_API_KEY` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
}

/// Limits on what the upload form accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted image payload in bytes.
    /// Default: 20 MiB (Gemini inline data limit)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            api_key: None,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_image_bytes() -> usize {
    crate::vision::models::MAX_IMAGE_SIZE_BYTES
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
