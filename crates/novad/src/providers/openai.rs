//! OpenAI adapter: bearer-authenticated chat completions.

use async_trait::async_trait;
use nova_common::{
    AdapterStatus, Completion, CompletionOptions, Conversation, OpenAiConfig, ProviderError,
    ProviderId, Role, SelectionError,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::ProviderAdapter;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

pub struct OpenAiAdapter {
    api_key: Option<String>,
    endpoint: String,
    http: reqwest::Client,
    timeout_ms: u64,
    model: RwLock<String>,
}

impl OpenAiAdapter {
    pub fn new(config: &OpenAiConfig) -> Self {
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
impl ProviderAdapter for OpenAiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::new("openai")
    }

    fn description(&self) -> &str {
        "OpenAI GPT models (fast, reliable, paid)"
    }

    async fn label(&self) -> String {
        "OpenAI GPT-3.5".to_string()
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    async fn probe(&self) -> AdapterStatus {
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

        let messages = conversation
            .turns()
            .iter()
            .map(|turn| ChatMessage {
                role: match turn.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                }
                .to_string(),
                content: turn.text.clone(),
            })
            .collect();

        let request = ChatCompletionRequest {
            model: model.clone(),
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let url = format!("{}/v1/chat/completions", self.endpoint);
        let response = self
            .http
            .post(&url)
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_ms)
                } else {
                    warn!("OpenAI request failed: {}", e);
                    ProviderError::Unavailable
                }
            })?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream { code, message });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::EmptyResponse)?;

        let text = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(Completion::with_model(text, model))
    }

    async fn models(&self) -> Vec<String> {
        vec!["gpt-3.5-turbo".to_string(), "gpt-4".to_string()]
    }

    async fn current_model(&self) -> Option<String> {
        Some(self.model.read().await.clone())
    }

    async fn switch_model(&self, model: &str) -> Result<(), SelectionError> {
        if model.is_empty() {
            return Err(SelectionError::UnknownModel {
                provider: ProviderId::new("openai"),
                model: model.to_string(),
            });
        }
        *self.model.write().await = model.to_string();
        info!("Switched OpenAI model to {}", model);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> OpenAiConfig {
        OpenAiConfig { api_key: key.map(String::from), ..OpenAiConfig::default() }
    }

    #[tokio::test]
    async fn test_probe_reflects_key_presence() {
        assert_eq!(
            OpenAiAdapter::new(&config(None)).probe().await,
            AdapterStatus::NotConfigured
        );
        assert_eq!(
            OpenAiAdapter::new(&config(Some("sk-test"))).probe().await,
            AdapterStatus::Available
        );
    }

    #[tokio::test]
    async fn test_complete_without_key_is_unconfigured() {
        let adapter = OpenAiAdapter::new(&config(None));
        let conv = Conversation::for_request("hi", &Default::default());
        let err = adapter
            .complete(&conv, &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unconfigured));
    }

    #[tokio::test]
    async fn test_advertised_models() {
        let adapter = OpenAiAdapter::new(&config(Some("sk-test")));
        let models = adapter.models().await;
        assert!(models.contains(&"gpt-3.5-turbo".to_string()));
        assert!(models.contains(&"gpt-4".to_string()));
    }
}
