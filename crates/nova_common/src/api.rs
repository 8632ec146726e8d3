//! HTTP request/response payloads for the novad API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::Context;

/// Inbound chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Context,
}

/// Outbound chat response. `provider` is a human-readable label, not
/// a raw identity ("Google Gemini Pro", "Ollama (mistral:latest)",
/// "Rule-based Fallback").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub provider: String,
    pub context: Context,
}

/// Request to pin the active provider (and model).
///
/// `model` is either `"<provider>: <model>"` or a bare legacy model
/// name, which is assumed to belong to the local Ollama daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchModelRequest {
    pub model: String,
}

/// Response to a switch request. Errors travel in-band as `{error}`
/// rather than as an HTTP status, matching the historical wire
/// contract the front-ends expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SwitchModelResponse {
    Switched {
        message: String,
        current_model: String,
        provider: String,
    },
    Error {
        error: String,
    },
}

/// One provider entry in the `/models` snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSnapshot {
    pub name: String,
    pub available: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    pub status: String,
    pub priority: u8,
    pub description: String,
}

/// Read-only snapshot of every configured provider plus the default
/// priority order as a display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub providers: Vec<ProviderSnapshot>,
    pub priority_order: String,
}

/// Inbound task request (placeholder task table carried from the
/// voice front-end contract).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    pub task: String,
    #[serde(default)]
    pub parameters: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskResponse {
    Result { result: String },
    Error { error: String },
}

/// Daemon health/liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub providers_configured: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_context_defaults_empty() {
        let req: ChatRequest = serde_json::from_value(json!({"message": "hi"})).unwrap();
        assert!(req.context.is_empty());
    }

    #[test]
    fn test_switch_response_serializes_flat() {
        let ok = SwitchModelResponse::Switched {
            message: "Switched to Ollama: mistral:latest".to_string(),
            current_model: "mistral:latest".to_string(),
            provider: "ollama".to_string(),
        };
        let v = serde_json::to_value(&ok).unwrap();
        assert_eq!(v["provider"], "ollama");
        assert!(v.get("error").is_none());

        let err = SwitchModelResponse::Error { error: "Could not switch".to_string() };
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["error"], "Could not switch");
    }
}
