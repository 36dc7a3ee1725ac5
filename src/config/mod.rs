// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::credentials::ApiKey;
use crate::error::{AdvisorError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Fallback environment variable for the Gemini API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Environment variables (`CALORIE_ADVISOR__SECTION__KEY`)
    /// 3. Config file
    /// 4. Defaults (lowest)
    ///
    /// The API key falls back to `GOOGLE_API_KEY` when no source set it.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::from_sources(path)?;
        config
            .gemini
            .resolve_api_key(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Build configuration from defaults, the config file and `CALORIE_ADVISOR__*`
    /// variables only.
    pub fn from_sources(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            // An explicitly requested file must exist
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("CALORIE_ADVISOR")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AdvisorError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".calorie-advisor")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

impl GeminiConfig {
    /// Fill in the API key from `fallback` unless one is already configured.
    /// Blank values count as unset.
    pub fn resolve_api_key(&mut self, fallback: Option<String>) {
        let configured = self.api_key.as_ref().is_some_and(|key| !key.is_blank());
        if configured {
            return;
        }
        self.api_key = fallback
            .map(ApiKey::new)
            .filter(|key| !key.is_blank());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.gemini.timeout_seconds, 60);
        assert_eq!(config.upload.max_image_bytes, 20 * 1024 * 1024);
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9000\n\n[gemini]\nmodel = \"gemini-2.0-flash\"\napi_key = \"from-file\""
        )
        .unwrap();

        let config = AppConfig::from_sources(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.api_key.unwrap().expose(), "from-file");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::from_sources(Some(Path::new("/nonexistent/calorie-advisor.toml")));
        assert!(matches!(result, Err(AdvisorError::Config(_))));
    }

    #[test]
    fn test_resolve_api_key_prefers_configured() {
        let mut gemini = GeminiConfig {
            api_key: Some(ApiKey::new("configured")),
            ..GeminiConfig::default()
        };
        gemini.resolve_api_key(Some("from-env".to_string()));
        assert_eq!(gemini.api_key.unwrap().expose(), "configured");
    }

    #[test]
    fn test_resolve_api_key_falls_back() {
        let mut gemini = GeminiConfig::default();
        gemini.resolve_api_key(Some("from-env".to_string()));
        assert_eq!(gemini.api_key.unwrap().expose(), "from-env");

        let mut gemini = GeminiConfig {
            api_key: Some(ApiKey::new("  ")),
            ..GeminiConfig::default()
        };
        gemini.resolve_api_key(Some(String::new()));
        assert!(gemini.api_key.is_none());
    }
}
