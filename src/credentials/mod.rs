// Gemini API credential handling
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Gemini API key.
///
/// The key is wiped from memory when dropped and never shows up in `Debug`
/// output, so configuration structs holding it are safe to log.
#[derive(Clone, Deserialize, Serialize, Zeroize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    /// The raw key, for the request header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

// Custom Debug impl that never logs the key
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("AIzaSyExampleKey123");
        let debug = format!("{:?}", key);
        assert!(!debug.contains("AIzaSyExampleKey123"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_new_trims_whitespace() {
        let key = ApiKey::new("  secret\n");
        assert_eq!(key.expose(), "secret");
        assert!(ApiKey::new("   ").is_blank());
    }
}
