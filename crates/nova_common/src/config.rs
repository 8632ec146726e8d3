//! Daemon configuration.
//!
//! Loaded from a TOML file when present, with environment variables
//! overriding API keys and endpoints. A missing or malformed file
//! falls back to defaults so the daemon always starts.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "/etc/nova/config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        // Localhost only; front-ends run on the same machine.
        Self { bind: "127.0.0.1:8001".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub endpoint: String,
    /// Probe timeout is shorter than the completion timeout: a probe
    /// must never eat a meaningful slice of the request budget.
    pub probe_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            probe_timeout_secs: 5,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NovaConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub openai: OpenAiConfig,
    pub ollama: OllamaConfig,
}

impl NovaConfig {
    /// Load from `NOVA_CONFIG` (or the default path), then apply
    /// environment overrides. Never fails.
    pub fn load() -> Self {
        let path = std::env::var("NOVA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load_from(Path::new(&path));
        config.apply_env_overrides();
        config
    }

    /// Load from an explicit path, falling back to defaults when the
    /// file is absent or does not parse.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Config file {} is invalid ({}), using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                self.gemini.api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.openai.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            if !url.is_empty() {
                self.ollama.endpoint = url;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = NovaConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:8001");
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.ollama.endpoint, "http://localhost:11434");
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = NovaConfig::load_from(Path::new("/nonexistent/nova.toml"));
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ollama]\nendpoint = \"http://10.0.0.5:11434\"").unwrap();

        let config = NovaConfig::load_from(file.path());
        assert_eq!(config.ollama.endpoint, "http://10.0.0.5:11434");
        // Untouched sections keep their defaults.
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_load_from_invalid_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();

        let config = NovaConfig::load_from(file.path());
        assert_eq!(config.server.bind, "127.0.0.1:8001");
    }
}
