//! Model bridge contract and registry
//!
//! A bridge turns a prompt into raw text. "No answer" is not an error: a
//! bridge returns empty-but-parsable text (`{"scenarios":[]}`) so parsing
//! degrades gracefully. [`BridgeError`] is reserved for a bridge that cannot
//! answer at all.

use crate::resilient::ResilientBridge;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use testforge_types::{BridgeError, ConfigError, ModelId, ResilienceSettings};
use tracing::debug;

/// Empty scenario list, the degraded answer
pub const EMPTY_RESPONSE: &str = r#"{"scenarios":[]}"#;

/// Text-generation backend
#[async_trait]
pub trait ModelBridge: Send + Sync + std::fmt::Debug {
    /// Model this bridge serves
    fn model(&self) -> ModelId;

    /// Send a prompt, return raw text
    ///
    /// # Errors
    /// [`BridgeError`] when the backend cannot produce any text.
    async fn invoke(&self, prompt: &str) -> Result<String, BridgeError>;
}

/// Bridge that never leaves the process
///
/// Answers every prompt with an empty scenario list. Registered for every
/// builtin model id; real backends replace it through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineBridge {
    model: ModelId,
}

impl OfflineBridge {
    /// Create offline bridge for a model
    #[inline]
    #[must_use]
    pub fn new(model: ModelId) -> Self {
        Self { model }
    }
}

#[async_trait]
impl ModelBridge for OfflineBridge {
    fn model(&self) -> ModelId {
        self.model.clone()
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BridgeError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "offline bridge answering");
        Ok(EMPTY_RESPONSE.to_string())
    }
}

/// Registry of bridges keyed by model id
#[derive(Debug, Default, Clone)]
pub struct BridgeRegistry {
    bridges: HashMap<ModelId, Arc<dyn ModelBridge>>,
}

impl BridgeRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            bridges: HashMap::new(),
        }
    }

    /// Create registry with an offline bridge per builtin model, each
    /// wrapped in a [`ResilientBridge`]
    #[must_use]
    pub fn with_defaults(settings: ResilienceSettings) -> Self {
        let mut registry = Self::new();
        for model in ModelId::BUILTIN {
            let offline: Arc<dyn ModelBridge> = Arc::new(OfflineBridge::new(model));
            registry.register(Arc::new(ResilientBridge::new(offline, settings)));
        }
        registry
    }

    /// Register a bridge under its own model id, replacing any previous one
    pub fn register(&mut self, bridge: Arc<dyn ModelBridge>) {
        self.bridges.insert(bridge.model(), bridge);
    }

    /// Look up the bridge for a model
    ///
    /// # Errors
    /// [`ConfigError::UnsupportedModel`] if nothing is registered.
    pub fn resolve(&self, model: &ModelId) -> Result<Arc<dyn ModelBridge>, ConfigError> {
        self.bridges
            .get(model)
            .cloned()
            .ok_or_else(|| ConfigError::UnsupportedModel(model.clone()))
    }

    /// Check if model is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, model: &ModelId) -> bool {
        self.bridges.contains_key(model)
    }

    /// Registered model ids, sorted
    #[must_use]
    pub fn models(&self) -> Vec<ModelId> {
        let mut models: Vec<_> = self.bridges.keys().cloned().collect();
        models.sort();
        models
    }

    /// Get number of registered bridges
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }
}
