//! Uniform adapter boundary over the completion backends.
//!
//! The orchestrator depends only on this trait; transport details
//! (REST shapes, auth, prompt flattening) stay inside each adapter.

pub mod gemini;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use nova_common::{
    AdapterStatus, Completion, CompletionOptions, Conversation, ProviderError, ProviderId,
    SelectionError,
};

pub use gemini::GeminiAdapter;
pub use ollama::OllamaAdapter;
pub use openai::OpenAiAdapter;

/// Capability wrapper around one completion backend.
///
/// `probe` must be cheap, bounded, and non-failing: reachability
/// problems convert to a status, never an error. `complete` returns a
/// typed error for every failure mode, including in-band error text a
/// backend embeds in an otherwise well-formed response body.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable registry identity ("gemini", "openai", "ollama").
    fn id(&self) -> ProviderId;

    /// One-line description for the `/models` snapshot.
    fn description(&self) -> &str;

    /// Human-readable label returned to callers, including the live
    /// model where the backend has that notion.
    async fn label(&self) -> String;

    /// Completion deadline enforced by the orchestrator for this
    /// adapter, in milliseconds.
    fn timeout_ms(&self) -> u64 {
        10_000
    }

    /// Live reachability/configuration check. Never cached across
    /// requests.
    async fn probe(&self) -> AdapterStatus;

    /// Send the conversation to the backend.
    async fn complete(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> Result<Completion, ProviderError>;

    /// Static template fast path for a small set of high-frequency
    /// requests. Checked before `complete`, never after.
    fn quick_template(&self, _user_text: &str) -> Option<String> {
        None
    }

    /// Model identifiers to advertise in the `/models` snapshot.
    async fn models(&self) -> Vec<String>;

    /// Currently active model, where the backend has one.
    async fn current_model(&self) -> Option<String> {
        None
    }

    /// Display status for the `/models` snapshot. Cloud adapters
    /// report configured/not configured; the local daemon overrides
    /// this with connected/disconnected.
    async fn status_label(&self) -> String {
        match self.probe().await {
            AdapterStatus::Available => "configured".to_string(),
            _ => "not configured".to_string(),
        }
    }

    /// Pin a different model on this backend.
    async fn switch_model(&self, model: &str) -> Result<(), SelectionError>;
}
