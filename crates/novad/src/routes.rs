//! API routes for novad.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use nova_common::{
    ChatRequest, ChatResponse, HealthResponse, ModelsResponse, ProviderId, SwitchModelRequest,
    SwitchModelResponse, TaskRequest, TaskResponse,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::server::AppState;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Chat Routes
// ============================================================================

pub fn chat_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(root))
        .route("/chat", post(chat))
        .route("/task", post(task))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Nova assistant backend is running!",
        "status": "active",
    }))
}

/// Chat endpoint with multi-provider support. Always answers: total
/// backend unavailability degrades to the rule-based fallback, never
/// to an error status.
async fn chat(State(state): State<AppStateArc>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    info!("[Q]  {}", req.message);

    let reply = state.orchestrator.handle(&req.message, &req.context).await;

    info!("[A]  via {}", reply.provider);
    Json(ChatResponse {
        answer: reply.answer,
        provider: reply.provider,
        context: reply.context,
    })
}

/// Placeholder task dispatch carried for the voice front-end.
async fn task(Json(req): Json<TaskRequest>) -> Json<TaskResponse> {
    let result = match req.task.as_str() {
        "weather" => "Weather functionality to be implemented",
        "play_music" => "Music playback functionality to be implemented",
        "set_reminder" => "Reminder functionality to be implemented",
        _ => {
            return Json(TaskResponse::Error { error: "Task not supported".to_string() });
        }
    };
    Json(TaskResponse::Result { result: result.to_string() })
}

// ============================================================================
// Model Routes
// ============================================================================

pub fn model_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/models", get(models))
        .route("/switch_model", post(switch_model))
}

/// Live snapshot of every provider: models, status, priority rank.
async fn models(State(state): State<AppStateArc>) -> Json<ModelsResponse> {
    Json(state.registry.snapshot().await)
}

/// Pin a provider (and model). Accepts `"<provider>: <model>"` or a
/// bare legacy model name, which is assumed to be an Ollama model.
/// Errors travel in-band as `{error}`; the selection is only changed
/// once the switch has succeeded.
async fn switch_model(
    State(state): State<AppStateArc>,
    Json(req): Json<SwitchModelRequest>,
) -> Json<SwitchModelResponse> {
    let requested = req.model.trim();
    if requested.is_empty() {
        return Json(SwitchModelResponse::Error { error: "Model name required".to_string() });
    }

    info!("Switch model request: '{}'", requested);

    if let Some((provider_part, model_part)) = requested.split_once(':') {
        let id = ProviderId::new(provider_part);
        let model = model_part.trim();

        // Only a recognized provider prefix counts as the
        // "provider: model" form. Bare Ollama tags also contain a
        // colon ("mistral:latest"), so anything else drops through to
        // the legacy path below.
        if let Some(adapter) = state.registry.get(&id) {
            if let Err(e) = adapter.switch_model(model).await {
                warn!("Switch failed: {}", e);
                return Json(SwitchModelResponse::Error {
                    error: format!("Could not switch to {}: {}", id, model),
                });
            }
            if let Err(e) = state.registry.set_selection(id.as_str()).await {
                warn!("Switch failed: {}", e);
                return Json(SwitchModelResponse::Error { error: e.to_string() });
            }
            return Json(SwitchModelResponse::Switched {
                message: format!("Switched to {}: {}", capitalized_label(&id), model),
                current_model: model.to_string(),
                provider: id.to_string(),
            });
        }
    }

    // Legacy format: a bare model name on the local Ollama daemon.
    let ollama = ProviderId::new("ollama");
    match state.registry.get(&ollama) {
        Some(adapter) => match adapter.switch_model(requested).await {
            Ok(()) => {
                // Known model, safe to pin.
                let _ = state.registry.set_selection("ollama").await;
                Json(SwitchModelResponse::Switched {
                    message: format!("Switched to Ollama: {}", requested),
                    current_model: requested.to_string(),
                    provider: "ollama".to_string(),
                })
            }
            Err(e) => {
                warn!("Switch failed: {}", e);
                Json(SwitchModelResponse::Error {
                    error: format!("Could not switch to {}", requested),
                })
            }
        },
        None => Json(SwitchModelResponse::Error {
            error: format!("Could not switch to {}", requested),
        }),
    }
}

fn capitalized_label(id: &ProviderId) -> String {
    match id.as_str() {
        "gemini" => "Gemini".to_string(),
        "openai" => "OpenAI".to_string(),
        "ollama" => "Ollama".to_string(),
        other => other.to_string(),
    }
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        providers_configured: state.registry.len(),
    })
}
