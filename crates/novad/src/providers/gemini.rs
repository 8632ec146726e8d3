//! Google Gemini adapter.
//!
//! Configured through an API key; completes via the REST
//! `generateContent` endpoint with the conversation flattened to a
//! single prompt.

use async_trait::async_trait;
use nova_common::{
    AdapterStatus, Completion, CompletionOptions, Conversation, GeminiConfig, ProviderError,
    ProviderId, SelectionError,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::ProviderAdapter;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct GeminiAdapter {
    api_key: Option<String>,
    endpoint: String,
    http: reqwest::Client,
    timeout_ms: u64,
    model: RwLock<String>,
}

impl GeminiAdapter {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            timeout_ms: config.timeout_secs * 1000,
            model: RwLock::new(config.model.clone()),
        }
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::new("gemini")
    }

    fn description(&self) -> &str {
        "Google Gemini Pro (free tier, fast, cloud-based)"
    }

    async fn label(&self) -> String {
        "Google Gemini Pro".to_string()
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    async fn probe(&self) -> AdapterStatus {
        // Key presence is the whole probe: reachability of the cloud
        // endpoint is only learned (and paid for) at completion time.
        if self.api_key.is_some() {
            AdapterStatus::Available
        } else {
            AdapterStatus::NotConfigured
        }
    }

    async fn complete(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> Result<Completion, ProviderError> {
        let key = self.api_key.as_ref().ok_or(ProviderError::Unconfigured)?;
        let model = self.model.read().await.clone();

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: conversation.flatten("Instructions") }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens.max(1000),
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, model, key
        );
        let response = self.http.post(&url).json(&request).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.timeout_ms)
            } else {
                warn!("Gemini request failed: {}", e);
                ProviderError::Unavailable
            }
        })?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream { code, message });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::EmptyResponse)?;

        let text = body
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(Completion::with_model(text, model))
    }

    async fn models(&self) -> Vec<String> {
        vec![self.model.read().await.clone()]
    }

    async fn current_model(&self) -> Option<String> {
        Some(self.model.read().await.clone())
    }

    async fn switch_model(&self, model: &str) -> Result<(), SelectionError> {
        if model.is_empty() {
            return Err(SelectionError::UnknownModel {
                provider: ProviderId::new("gemini"),
                model: model.to_string(),
            });
        }
        *self.model.write().await = model.to_string();
        info!("Switched Gemini model to {}", model);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> GeminiConfig {
        GeminiConfig { api_key: key.map(String::from), ..GeminiConfig::default() }
    }

    #[tokio::test]
    async fn test_probe_without_key_is_not_configured() {
        let adapter = GeminiAdapter::new(&config(None));
        assert_eq!(adapter.probe().await, AdapterStatus::NotConfigured);

        // Empty string counts as unset.
        let adapter = GeminiAdapter::new(&config(Some("")));
        assert_eq!(adapter.probe().await, AdapterStatus::NotConfigured);
    }

    #[tokio::test]
    async fn test_probe_with_key_is_available() {
        let adapter = GeminiAdapter::new(&config(Some("test-key")));
        assert_eq!(adapter.probe().await, AdapterStatus::Available);
    }

    #[tokio::test]
    async fn test_complete_without_key_is_unconfigured() {
        let adapter = GeminiAdapter::new(&config(None));
        let conv = Conversation::for_request("hi", &Default::default());
        let err = adapter
            .complete(&conv, &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unconfigured));
    }

    #[tokio::test]
    async fn test_switch_model_updates_label_state() {
        let adapter = GeminiAdapter::new(&config(Some("test-key")));
        adapter.switch_model("gemini-1.5-pro").await.unwrap();
        assert_eq!(adapter.current_model().await.as_deref(), Some("gemini-1.5-pro"));
        assert!(adapter.switch_model("").await.is_err());
    }
}
