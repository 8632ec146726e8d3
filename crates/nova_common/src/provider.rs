//! Provider identities, adapter status, and the error taxonomy shared
//! between the orchestrator and the individual backend adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identity of a completion backend ("gemini", "openai",
/// "ollama"). Stored lowercase so selection matching is
/// case-insensitive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Live status of an adapter, derived by probing it. Never cached
/// beyond a single orchestration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterStatus {
    /// No credentials or endpoint configured.
    NotConfigured,
    /// Configured but the probe failed to reach the service.
    ConfiguredUnavailable,
    /// Probe succeeded; worth attempting a completion.
    Available,
}

impl AdapterStatus {
    pub fn is_available(self) -> bool {
        matches!(self, AdapterStatus::Available)
    }
}

/// Generation parameters for a single completion call. The timeout is
/// enforced by the orchestrator on top of whatever the adapter's HTTP
/// client does, since upstream libraries may not honor deadlines.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
            timeout_ms: 10_000,
        }
    }
}

/// Text produced by a backend, plus the concrete model that produced
/// it when the backend reports one (used for display labels).
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub model: Option<String>,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), model: None }
    }

    pub fn with_model(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self { text: text.into(), model: Some(model.into()) }
    }
}

/// Typed failure of a single adapter attempt. Every variant is
/// recovered by the orchestrator, which moves on to the next
/// candidate; none of these ever reach the HTTP caller.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("provider has no credentials or endpoint configured")]
    Unconfigured,

    #[error("provider probe failed: service unreachable")]
    Unavailable,

    #[error("completion timed out after {0}ms")]
    Timeout(u64),

    #[error("backend error {code}: {message}")]
    Upstream { code: u16, message: String },

    #[error("backend returned no usable text")]
    EmptyResponse,
}

/// Failure of a selection change. The only provider-level error that
/// is surfaced to a caller.
#[derive(Debug, Clone, Error)]
pub enum SelectionError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("model '{model}' is not available on {provider}")]
    UnknownModel { provider: ProviderId, model: String },
}
