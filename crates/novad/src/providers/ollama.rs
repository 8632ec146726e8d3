//! Ollama adapter: local inference daemon.
//!
//! Probes `/api/tags` for reachability and model discovery, completes
//! via `/api/generate` with the conversation flattened to a single
//! prompt. Code-looking requests get tighter sampling options and may
//! be answered from a static template before any live call.

use async_trait::async_trait;
use nova_common::{
    AdapterStatus, Completion, CompletionOptions, Conversation, OllamaConfig, ProviderError,
    ProviderId, SelectionError,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::ProviderAdapter;
use crate::fast_path;

/// Models preferred as the default, in order, when the tag list
/// offers a choice.
const PREFERRED_MODELS: &[&str] = &["mistral:latest", "gpt-oss:20b"];

const CODE_KEYWORDS: &[&str] = &[
    "program", "code", "function", "cpp", "python", "java", "javascript", "algorithm",
];

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

#[derive(Debug, Default)]
struct ModelState {
    available: Vec<String>,
    current: Option<String>,
}

pub struct OllamaAdapter {
    endpoint: String,
    http: reqwest::Client,
    probe_http: reqwest::Client,
    timeout_ms: u64,
    state: RwLock<ModelState>,
}

impl OllamaAdapter {
    pub fn new(config: &OllamaConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            probe_http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.probe_timeout_secs))
                .build()
                .unwrap_or_default(),
            timeout_ms: config.timeout_secs * 1000,
            state: RwLock::new(ModelState::default()),
        }
    }

    /// Refresh the model list from `/api/tags`. Returns false when
    /// the daemon is unreachable.
    async fn refresh_models(&self) -> bool {
        let url = format!("{}/api/tags", self.endpoint);
        let tags: TagsResponse = match self.probe_http.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => match resp.json().await {
                Ok(tags) => tags,
                Err(e) => {
                    debug!("Ollama tag list did not parse: {}", e);
                    return false;
                }
            },
            Ok(resp) => {
                debug!("Ollama tags returned HTTP {}", resp.status());
                return false;
            }
            Err(e) => {
                debug!("Cannot reach Ollama at {}: {}", self.endpoint, e);
                return false;
            }
        };

        let available: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
        let mut state = self.state.write().await;

        // Keep an explicitly switched model as long as it still
        // exists; otherwise fall back to the preferred default.
        let keep_current = state
            .current
            .as_ref()
            .map(|m| available.contains(m))
            .unwrap_or(false);
        if !keep_current {
            state.current = default_model(&available);
            if let Some(model) = &state.current {
                info!("Ollama default model: {}", model);
            }
        }
        state.available = available;
        true
    }
}

#[async_trait]
impl ProviderAdapter for OllamaAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::new("ollama")
    }

    fn description(&self) -> &str {
        "Local AI models (private, slower)"
    }

    async fn label(&self) -> String {
        match &self.state.read().await.current {
            Some(model) => format!("Ollama ({})", model),
            None => "Ollama".to_string(),
        }
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    async fn probe(&self) -> AdapterStatus {
        if !self.refresh_models().await {
            return AdapterStatus::ConfiguredUnavailable;
        }
        if self.state.read().await.current.is_none() {
            // Reachable but no models pulled yet.
            return AdapterStatus::ConfiguredUnavailable;
        }
        AdapterStatus::Available
    }

    async fn complete(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> Result<Completion, ProviderError> {
        let model = self
            .state
            .read()
            .await
            .current
            .clone()
            .ok_or(ProviderError::Unavailable)?;

        let prompt = conversation.flatten("System");
        let request = GenerateRequest {
            model: model.clone(),
            prompt: prompt.clone(),
            stream: false,
            options: sampling_for(&prompt, options),
        };

        let url = format!("{}/api/generate", self.endpoint);
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_ms)
                } else {
                    warn!("Ollama request failed: {}", e);
                    ProviderError::Unavailable
                }
            })?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream { code, message });
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::EmptyResponse)?;

        if generated.response.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(Completion::with_model(generated.response, model))
    }

    fn quick_template(&self, user_text: &str) -> Option<String> {
        fast_path::quick_code_template(user_text)
    }

    async fn models(&self) -> Vec<String> {
        self.state.read().await.available.clone()
    }

    async fn current_model(&self) -> Option<String> {
        self.state.read().await.current.clone()
    }

    async fn status_label(&self) -> String {
        match self.probe().await {
            AdapterStatus::Available => "connected".to_string(),
            _ => "disconnected".to_string(),
        }
    }

    async fn switch_model(&self, model: &str) -> Result<(), SelectionError> {
        // Refresh first so a model pulled after startup is switchable.
        self.refresh_models().await;

        let mut state = self.state.write().await;
        if state.available.iter().any(|m| m == model) {
            state.current = Some(model.to_string());
            info!("Switched Ollama model to {}", model);
            Ok(())
        } else {
            Err(SelectionError::UnknownModel {
                provider: ProviderId::new("ollama"),
                model: model.to_string(),
            })
        }
    }
}

/// Pick the default model from a tag list: preferred names first,
/// otherwise the first listed.
fn default_model(available: &[String]) -> Option<String> {
    for preferred in PREFERRED_MODELS {
        if available.iter().any(|m| m == preferred) {
            return Some(preferred.to_string());
        }
    }
    available.first().cloned()
}

/// Sampling options for a prompt. Code-looking prompts get lower
/// temperature, a tighter token budget, and a stop sequence that cuts
/// off runaway output.
fn sampling_for(prompt: &str, options: &CompletionOptions) -> GenerateOptions {
    if is_code_request(prompt) {
        GenerateOptions {
            temperature: 0.3,
            top_p: 0.8,
            num_predict: options.max_tokens,
            stop: Some(vec!["\n\n\n".to_string()]),
        }
    } else {
        GenerateOptions {
            temperature: options.temperature,
            top_p: 0.9,
            num_predict: options.max_tokens.min(200),
            stop: None,
        }
    }
}

fn is_code_request(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    CODE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_prefers_mistral() {
        let models = vec![
            "llama3:8b".to_string(),
            "mistral:latest".to_string(),
            "gpt-oss:20b".to_string(),
        ];
        assert_eq!(default_model(&models), Some("mistral:latest".to_string()));
    }

    #[test]
    fn test_default_model_second_preference() {
        let models = vec!["llama3:8b".to_string(), "gpt-oss:20b".to_string()];
        assert_eq!(default_model(&models), Some("gpt-oss:20b".to_string()));
    }

    #[test]
    fn test_default_model_falls_back_to_first() {
        let models = vec!["qwen3:4b".to_string(), "llama3:8b".to_string()];
        assert_eq!(default_model(&models), Some("qwen3:4b".to_string()));
        assert_eq!(default_model(&[]), None);
    }

    #[test]
    fn test_code_request_detection() {
        assert!(is_code_request("Write a python function for sorting"));
        assert!(is_code_request("Explain this ALGORITHM"));
        assert!(!is_code_request("What is the capital of Norway?"));
    }

    #[test]
    fn test_code_sampling_is_tighter() {
        let opts = CompletionOptions::default();
        let code = sampling_for("write a cpp program", &opts);
        assert_eq!(code.temperature, 0.3);
        assert!(code.stop.is_some());

        let chat = sampling_for("hello there", &opts);
        assert_eq!(chat.temperature, opts.temperature);
        assert!(chat.num_predict <= 200);
        assert!(chat.stop.is_none());
    }
}
