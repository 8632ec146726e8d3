//! Provider orchestration engine.
//!
//! For each chat request: build the conversation, take the attempt
//! order from the registry, try each adapter once (probe, then quick
//! template, then completion with a caller-enforced deadline), stop
//! at the first success, and degrade to the rule-based responder when
//! everything fails. Adapter failures are logged and never surfaced
//! to the caller.

use nova_common::{
    merge_context, CompletionOptions, Context, Conversation, ProviderError,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::fallback;
use crate::registry::ProviderRegistry;

/// Outcome of one orchestrated request. Always produced; there is no
/// error branch a caller can observe.
#[derive(Debug, Clone)]
pub struct Reply {
    pub answer: String,
    pub provider: String,
    pub context: Context,
}

pub struct Orchestrator {
    registry: Arc<ProviderRegistry>,
}

impl Orchestrator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Route one chat request across the configured providers.
    pub async fn handle(&self, message: &str, context: &Context) -> Reply {
        let conversation = Conversation::for_request(message, context);
        let selection = self.registry.selection().await;
        let order = self.registry.order_for(&selection);

        for adapter in order {
            let id = adapter.id();

            let status = adapter.probe().await;
            if !status.is_available() {
                debug!("Skipping {}: {:?}", id, status);
                continue;
            }

            // Quick templates are always checked before the live
            // call; a hit counts as a full success.
            if let Some(text) = adapter.quick_template(message) {
                info!("Quick template hit on {}", id);
                let label = format!("{} - Quick Code", adapter.label().await);
                return self.reply(text, label, message, context);
            }

            let options = CompletionOptions {
                timeout_ms: adapter.timeout_ms(),
                ..CompletionOptions::default()
            };

            // The deadline is enforced here, on top of whatever the
            // adapter's HTTP client does: a misbehaving upstream must
            // not make the request latency unbounded.
            let deadline = Duration::from_millis(options.timeout_ms);
            let result = match tokio::time::timeout(
                deadline,
                adapter.complete(&conversation, &options),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(options.timeout_ms)),
            };

            match result {
                Ok(completion) if completion.text.trim().is_empty() => {
                    warn!("{} failed: {}", id, ProviderError::EmptyResponse);
                }
                Ok(completion) => {
                    info!("Answered by {}", id);
                    let label = adapter.label().await;
                    return self.reply(completion.text, label, message, context);
                }
                Err(e) => {
                    // Never fatal: the next candidate gets its turn.
                    warn!("{} failed: {}", id, e);
                }
            }
        }

        debug!("All providers exhausted, using rule-based fallback");
        let answer = fallback::respond(message);
        self.reply(answer, fallback::RULE_BASED_LABEL.to_string(), message, context)
    }

    fn reply(&self, answer: String, provider: String, message: &str, context: &Context) -> Reply {
        let context = merge_context(context, message, &answer);
        Reply { answer, provider, context }
    }
}
