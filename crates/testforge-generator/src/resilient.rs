//! Resilient bridge wrapper
//!
//! Adds a per-attempt timeout and bounded retries with exponential backoff
//! to any [`ModelBridge`]. Only retryable errors (timeouts, unavailability)
//! are retried; anything else is returned on the spot.

use crate::bridge::ModelBridge;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use testforge_types::{BridgeError, ModelId, ResilienceSettings};
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

/// Wraps any bridge with timeout and retry
///
/// # Example
///
/// ```rust,ignore
/// let inner: Arc<dyn ModelBridge> = Arc::new(MyHttpBridge::new(api_key));
/// let bridge = ResilientBridge::new(inner, ResilienceSettings::default());
///
/// // every call is now bounded by the timeout and retried on transient failure
/// let text = bridge.invoke(&prompt).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ResilientBridge {
    inner: Arc<dyn ModelBridge>,
    settings: ResilienceSettings,
}

impl ResilientBridge {
    /// Create a new resilient wrapper
    #[must_use]
    pub fn new(inner: Arc<dyn ModelBridge>, settings: ResilienceSettings) -> Self {
        Self { inner, settings }
    }

    /// Create with default settings
    #[must_use]
    pub fn with_defaults(inner: Arc<dyn ModelBridge>) -> Self {
        Self::new(inner, ResilienceSettings::default())
    }

    /// Settings in use
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ResilienceSettings {
        &self.settings
    }

    async fn attempt(&self, prompt: &str) -> Result<String, BridgeError> {
        let seconds = self.settings.timeout_secs;
        match timeout(Duration::from_secs(seconds), self.inner.invoke(prompt)).await {
            Ok(outcome) => outcome,
            Err(_elapsed) => Err(BridgeError::Timeout { seconds }),
        }
    }
}

#[async_trait]
impl ModelBridge for ResilientBridge {
    fn model(&self) -> ModelId {
        self.inner.model()
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BridgeError> {
        let mut backoff = self.settings.initial_backoff_ms;
        let mut last_error = None;

        for attempt in 0..=self.settings.max_retries {
            if attempt > 0 {
                debug!(attempt, backoff_ms = backoff, "retrying model call");
                sleep(Duration::from_millis(backoff)).await;
                backoff = backoff.saturating_mul(2).min(self.settings.max_backoff_ms);
            }

            match self.attempt(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    warn!(model = %self.inner.model(), attempt, error = %e, "model call failed");
                    last_error = Some(e);
                }
            }
        }

        Err(BridgeError::RetriesExhausted {
            attempts: self.settings.max_retries.saturating_add(1),
            last: Box::new(
                last_error.unwrap_or_else(|| BridgeError::Unavailable("no attempt made".into())),
            ),
        })
    }
}
