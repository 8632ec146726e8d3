//! HTTP server for novad.

use anyhow::{Context as _, Result};
use axum::Router;
use nova_common::NovaConfig;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::orchestrator::Orchestrator;
use crate::providers::{GeminiAdapter, OllamaAdapter, OpenAiAdapter, ProviderAdapter};
use crate::registry::ProviderRegistry;
use crate::routes;

/// Application state shared across handlers.
pub struct AppState {
    pub registry: Arc<ProviderRegistry>,
    pub orchestrator: Orchestrator,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(registry: ProviderRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            orchestrator: Orchestrator::new(registry.clone()),
            registry,
            start_time: Instant::now(),
        }
    }
}

/// Build the live adapters in default priority order: Gemini first
/// (free, fast, cloud), then OpenAI (paid), then the local Ollama
/// daemon.
pub fn build_registry(config: &NovaConfig) -> ProviderRegistry {
    let adapters: Vec<Arc<dyn ProviderAdapter>> = vec![
        Arc::new(GeminiAdapter::new(&config.gemini)),
        Arc::new(OpenAiAdapter::new(&config.openai)),
        Arc::new(OllamaAdapter::new(&config.ollama)),
    ];
    ProviderRegistry::new(adapters)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::chat_routes())
        .merge(routes::model_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until the process is stopped.
pub async fn run(config: NovaConfig) -> Result<()> {
    let state = Arc::new(AppState::new(build_registry(&config)));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    info!("  Listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
