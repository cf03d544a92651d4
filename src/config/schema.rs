//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the JSON
//! config file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    /// Service name → upstream base URL. Keys are case-sensitive and
    /// contain no slashes. Read-only after load.
    pub mappings: HashMap<String, String>,

    /// Bind address (e.g., "0.0.0.0:8448").
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Response capture settings.
    #[serde(default)]
    pub capture: CaptureConfig,
}

/// Response capture settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Persist upstream responses to disk.
    pub enabled: bool,

    /// Directory the capture artifacts are written to, created on
    /// first use if absent.
    pub dir: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: "responses".to_string(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8448".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappings_only_config_parses_with_defaults() {
        let config: ProxyConfig =
            serde_json::from_str(r#"{"mappings": {"api": "http://127.0.0.1:9001"}}"#).unwrap();

        assert_eq!(config.mappings["api"], "http://127.0.0.1:9001");
        assert_eq!(config.listen, "0.0.0.0:8448");
        assert!(!config.capture.enabled);
        assert_eq!(config.capture.dir, "responses");
    }

    #[test]
    fn capture_settings_parse() {
        let config: ProxyConfig = serde_json::from_str(
            r#"{"mappings": {}, "capture": {"enabled": true, "dir": "artifacts"}}"#,
        )
        .unwrap();

        assert!(config.capture.enabled);
        assert_eq!(config.capture.dir, "artifacts");
    }

    #[test]
    fn missing_mappings_is_an_error() {
        let result = serde_json::from_str::<ProxyConfig>(r#"{"listen": "0.0.0.0:1"}"#);
        assert!(result.is_err());
    }
}
