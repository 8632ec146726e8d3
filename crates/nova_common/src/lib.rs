//! Shared types for the Nova assistant daemon.
//!
//! Wire/domain types used by `novad` and by clients of its HTTP API:
//! conversations, provider identities and errors, request/response
//! payloads, and configuration.

pub mod api;
pub mod chat;
pub mod config;
pub mod provider;

pub use api::{
    ChatRequest, ChatResponse, HealthResponse, ModelsResponse, ProviderSnapshot,
    SwitchModelRequest, SwitchModelResponse, TaskRequest, TaskResponse,
};
pub use chat::{merge_context, Context, Conversation, Role, Turn, KEY_LAST_ANSWER, KEY_LAST_MESSAGE};
pub use config::{GeminiConfig, NovaConfig, OllamaConfig, OpenAiConfig, ServerConfig};
pub use provider::{
    AdapterStatus, Completion, CompletionOptions, ProviderError, ProviderId, SelectionError,
};
