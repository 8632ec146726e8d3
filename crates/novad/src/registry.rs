//! Provider registry and selection.
//!
//! Holds the configured adapters in fixed default priority order plus
//! the single mutable `Selection`. The ordering decision itself is a
//! pure function of `(Selection, default order)`; the lock only
//! guards the selection value, never a provider call.

use nova_common::{ModelsResponse, ProviderId, ProviderSnapshot, SelectionError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::providers::ProviderAdapter;

/// Active provider-ordering override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Default priority order.
    Auto,
    /// Try the pinned provider first, then the rest in default order.
    Pinned(ProviderId),
}

pub struct ProviderRegistry {
    /// Configured adapters in default priority order (rank = index).
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    selection: RwLock<Selection>,
}

impl ProviderRegistry {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { adapters, selection: RwLock::new(Selection::Auto) }
    }

    pub fn get(&self, id: &ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.iter().find(|a| &a.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Snapshot of the current selection. Requests that read it
    /// before a switch keep orchestrating under the old value.
    pub async fn selection(&self) -> Selection {
        self.selection.read().await.clone()
    }

    /// Pin a provider. Identity matching is case-insensitive; an
    /// unknown name leaves the current selection unchanged.
    pub async fn set_selection(&self, name: &str) -> Result<ProviderId, SelectionError> {
        let id = ProviderId::new(name);
        if self.get(&id).is_none() {
            return Err(SelectionError::UnknownProvider(name.to_string()));
        }
        *self.selection.write().await = Selection::Pinned(id.clone());
        info!("Pinned provider: {}", id);
        Ok(id)
    }

    /// Clear any pin and return to the default priority order.
    pub async fn reset_selection(&self) {
        *self.selection.write().await = Selection::Auto;
    }

    /// Attempt order for a selection: the pinned provider first, then
    /// the remaining providers in their default relative order, each
    /// at most once. A pinned identity that is no longer configured
    /// degrades to the default order.
    pub fn order_for(&self, selection: &Selection) -> Vec<Arc<dyn ProviderAdapter>> {
        match selection {
            Selection::Auto => self.adapters.clone(),
            Selection::Pinned(id) => {
                let Some(pinned) = self.get(id) else {
                    return self.adapters.clone();
                };
                let mut order = vec![pinned];
                order.extend(self.adapters.iter().filter(|a| &a.id() != id).cloned());
                order
            }
        }
    }

    /// Default priority order as a display string for `/models`.
    pub fn priority_display(&self) -> String {
        let mut names: Vec<String> = self
            .adapters
            .iter()
            .map(|a| capitalize(a.id().as_str()))
            .collect();
        names.push("Rule-based fallback".to_string());
        names.join(" → ")
    }

    /// Live per-provider snapshot for the `/models` endpoint.
    pub async fn snapshot(&self) -> ModelsResponse {
        let mut providers = Vec::with_capacity(self.adapters.len());
        for (rank, adapter) in self.adapters.iter().enumerate() {
            providers.push(ProviderSnapshot {
                name: adapter.id().to_string(),
                available: adapter.models().await,
                current: adapter.current_model().await,
                status: adapter.status_label().await,
                priority: rank as u8 + 1,
                description: adapter.description().to_string(),
            });
        }
        ModelsResponse { providers, priority_order: self.priority_display() }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
