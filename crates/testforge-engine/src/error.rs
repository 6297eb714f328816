//! Engine error types

use testforge_types::{BridgeError, ConfigError, PipelineStage};

/// Pipeline failure
///
/// Every stage returns this; `generate_tests` catches it exactly once and
/// turns it into a failed [`GenerationResult`](testforge_types::GenerationResult).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration or resolution failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The model bridge could not produce text
    #[error("model bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// A stage failed for another reason
    #[error("{} stage failed: {message}", .stage.name())]
    StageFailed {
        /// Stage that failed
        stage: PipelineStage,
        /// Failure detail
        message: String,
    },
}

impl EngineError {
    /// Create a stage failure
    #[inline]
    pub fn stage_failed(stage: PipelineStage, message: impl Into<String>) -> Self {
        Self::StageFailed {
            stage,
            message: message.into(),
        }
    }

    /// Stage the error belongs to, if it is tied to one
    #[must_use]
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Config(_) => None,
            Self::Bridge(_) => Some(PipelineStage::GeneratingScenarios),
            Self::StageFailed { stage, .. } => Some(*stage),
        }
    }

    /// Check if a retry of the whole run could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Bridge(e) => e.is_retryable(),
            Self::Config(_) | Self::StageFailed { .. } => false,
        }
    }
}
